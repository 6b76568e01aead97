use anyhow::Result;

use folio_core::AppConfig;

pub fn run(config: &AppConfig) -> Result<()> {
    let catalog = config.catalog()?;

    println!("Pages ({}):\n", catalog.total());

    for page in catalog.iter() {
        let next = catalog
            .next(&page.id)
            .map(|p| p.id.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("  {:>3}  {:<16} {}", page.order, page.id, page.title);
        println!("       next: {}", next);
    }

    Ok(())
}
