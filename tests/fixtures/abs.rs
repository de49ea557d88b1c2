fn f(x: i32) -> i32 {
    if x >= 0 { x } else { -x }
}

fn main() {
    f(-3);
}
