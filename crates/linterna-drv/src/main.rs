use anyhow::{Context, Result};

fn main() -> Result<()> {
    let path = std::env::args().nth(1).context("usage: linterna <file>")?;
    let source =
        std::fs::read_to_string(&path).with_context(|| format!("cannot read '{path}'"))?;

    let lexical = linterna_drv::lexical_analysis(&source);
    let semantic = linterna_drv::semantic_analysis(&source);

    println!("{}", lexical.lexical_report);
    println!("{}", lexical.syntactic_report);
    println!("{}", semantic.report);
    Ok(())
}
