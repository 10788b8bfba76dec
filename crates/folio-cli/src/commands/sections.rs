use anyhow::Result;

use folio_core::config::SectionKind;
use folio_core::AppConfig;

pub fn run(config: &AppConfig) -> Result<()> {
    println!("Sections ({}):\n", config.sections.len());

    for (i, section) in config.sections.iter().enumerate() {
        let detail = match section.kind {
            SectionKind::Hero => "hero".to_string(),
            SectionKind::Cards => {
                let lines: usize = section.cards.iter().map(|c| c.lines.len()).sum();
                format!("{} cards, {} lines", section.cards.len(), lines)
            }
        };
        println!("  {}. #{} - {} ({})", i + 1, section.id, section.title, detail);
    }

    Ok(())
}
