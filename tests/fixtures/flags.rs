fn flags() -> [bool; 12] {
    [
        true, true, true, true, true, true, true, true, true, true, true, true,
    ]
}

fn main() {
    flags();
}
