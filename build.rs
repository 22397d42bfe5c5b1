use anyhow::Result;
use vergen::EmitBuilder;

// Stamps `--version` output with the commit and build date.
fn main() -> Result<()> {
    EmitBuilder::builder()
        .build_date()
        .git_sha(true)
        .git_commit_date()
        .emit()?;
    Ok(())
}
