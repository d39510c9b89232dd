use fixtura_derive::fixtura_error;

#[fixtura_error]
pub enum DemoError {
    #[error("IO error: {0}")]
    Io(std::io::Error),
}

fn main() {}
