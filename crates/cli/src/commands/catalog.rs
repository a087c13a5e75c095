//! List the built-in minion catalog.

use anyhow::Result;
use clap::Parser;
use combat_content::Catalog;

#[derive(Debug, Parser)]
pub struct ListCatalog {
    /// Only list minions of this rank
    #[arg(short, long)]
    rank: Option<u8>,
}

impl ListCatalog {
    pub fn execute(&self) -> Result<()> {
        let catalog = Catalog::standard();
        for name in catalog.names() {
            let Some(minion) = catalog.get(name) else {
                continue;
            };
            if self.rank.is_some_and(|rank| rank != minion.rank) {
                continue;
            }
            let keywords: Vec<_> = minion
                .keywords
                .iter_names()
                .map(|(keyword, _)| keyword.to_lowercase())
                .collect();
            println!(
                "{:<22} rank {} {:>2}/{:<2} {}",
                minion.name,
                minion.rank,
                minion.attack,
                minion.defense,
                keywords.join(", ")
            );
        }
        Ok(())
    }
}
