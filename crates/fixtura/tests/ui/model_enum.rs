#![allow(dead_code)]
use fixtura::Model;

#[derive(Model)]
enum Shape {
    Circle,
}

fn main() {}
