fn classify(n: i32) -> i32 {
    let mut total = 0;
    if n > 10 && n < 100 {
        total += n * 2;
    } else {
        total = n - 1;
    }
    record(total);
    total
}

fn record(value: i32) -> bool {
    let seen = value != 0;
    seen || value > 7
}

fn settle(a: i32, b: i32) -> i32 {
    if a == b {
        return a + b;
    }
    classify(a) * classify(b)
}

fn main() {
    classify(5);
    classify(50);
    record(3);
    settle(1, 2);
}
