fn flag() -> bool {
    let x = true;
    x
}

fn main() {
    flag();
}
