use std::path::Path;

fn main() -> anyhow::Result<()> {
    labelforge_observability::init();

    let jobs = labelforge_labeler::standard_batch();
    labelforge_labeler::run_batch(&jobs, Path::new("barcodes"))?;
    Ok(())
}
