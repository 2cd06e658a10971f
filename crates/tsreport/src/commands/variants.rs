use std::error::Error;

use clap::Args;
use tsreport_core::{builtin_variant, builtin_variants, variant_to_yaml, Extraction, SamplePolicy};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Name of the built-in variant.
    pub name: String,
}

pub fn list() -> Result<(), Box<dyn Error>> {
    for variant in builtin_variants() {
        let extraction = match &variant.extraction {
            Extraction::Provenance { .. } => "provenance",
            Extraction::Filename { .. } => "filename",
        };
        let samples = match &variant.samples {
            SamplePolicy::All => "all",
            SamplePolicy::Flagged { .. } => "flagged",
        };
        println!(
            "{:<18} {:<16} {:<10} {:<8} {}",
            variant.name,
            variant.pattern,
            extraction,
            samples,
            variant.header_line()
        );
    }
    Ok(())
}

pub fn show(args: &ShowArgs) -> Result<(), Box<dyn Error>> {
    let variant = builtin_variant(&args.name)?;
    print!("{}", variant_to_yaml(&variant)?);
    Ok(())
}
