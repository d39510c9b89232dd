#![allow(dead_code)]
use fixtura::Model;

#[derive(Model)]
struct Pair(u32, u32);

fn main() {}
