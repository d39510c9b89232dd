#![allow(dead_code)]
use fixtura::Model;

#[derive(Model)]
struct Account {
    #[fixture(defualt = "a")]
    id: String,
}

fn main() {}
