//! Find-and-Replace Debugging Exercise
//!
//! Replaces the first occurrence of a substring and prints the patched
//! line. The default arguments correct a famously misremembered movie
//! quote.
//!
//! By default the unchecked replacement path runs: when the substring
//! is missing, the failed search flows straight into string slicing and
//! the program aborts. Run it under a debugger, inspect the splice
//! indices on the failing path, and add the missing check; `--checked`
//! shows the corrected behavior for comparison.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin find_replace -- [OPTIONS] [INPUT] [OLD] [NEW]
//! ```
//!
//! # Example
//!
//! ```bash
//! cargo run --bin find_replace -- "Luke, I am your father." Luke No
//! ```

use clap::Parser;
use imgstat::patch;
use tracing::debug;

/// Command-line arguments for the find-and-replace exercise
#[derive(Parser)]
#[command(name = "find_replace")]
#[command(about = "Find-and-Replace Exercise - replaces the first occurrence of a substring")]
struct Args {
    /// Line of text to patch
    #[arg(default_value = "Luke, I am your father.")]
    input: String,

    /// Substring to search for
    #[arg(default_value = "Luke")]
    old: String,

    /// Replacement text
    #[arg(default_value = "No")]
    new: String,

    /// Report a missing substring as an error instead of aborting
    #[arg(long)]
    checked: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    imgstat::utils::init_tracing();

    let args = Args::parse();
    debug!(old = %args.old, new = %args.new, "patching input line");

    let patched = if args.checked {
        patch::find_and_replace_checked(&args.input, &args.old, &args.new)?
    } else {
        patch::find_and_replace(&args.input, &args.old, &args.new)
    };

    println!("{patched}");
    Ok(())
}
