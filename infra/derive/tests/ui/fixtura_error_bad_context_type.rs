use fixtura_derive::fixtura_error;

#[fixtura_error]
pub enum DemoError {
    #[error("IO error: {source}")]
    Io { source: std::io::Error, context: String },
}

fn main() {}
