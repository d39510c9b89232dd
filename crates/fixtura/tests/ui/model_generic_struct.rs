#![allow(dead_code)]
use fixtura::Model;

#[derive(Model)]
struct Wrapper<T> {
    inner: T,
}

fn main() {}
