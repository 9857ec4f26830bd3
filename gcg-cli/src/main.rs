mod application;
mod presentation;

use gcg_core::error::Result;

fn main() -> Result<()> {
    application::run()
}
