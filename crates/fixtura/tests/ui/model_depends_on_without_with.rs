#![allow(dead_code)]
use fixtura::Model;

#[derive(Model)]
struct Account {
    #[fixture(default = "a")]
    id: String,
    #[fixture(depends_on(id))]
    handle: String,
}

fn main() {}
