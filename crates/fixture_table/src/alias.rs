//! Alias tabulka: lokální (španělské) jméno soupeře <-> identifikátor,
//! pod kterým ho vede zdroj výsledků (FIBA, anglicky).

use anyhow::{bail, Result};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    to_source: HashMap<String, String>,
    // klíč lowercase, zdroje nedrží velikost písmen konzistentně
    to_local: HashMap<String, String>,
}

impl AliasTable {
    pub fn new<I, L, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (L, S)>,
        L: Into<String>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for (local, source) in pairs {
            let local = local.into();
            let source = source.into();

            if source.trim().is_empty() {
                bail!("alias for {local:?} is empty");
            }
            if table.to_source.contains_key(&local) {
                bail!("duplicate alias entry for {local:?}");
            }
            let key = source.to_lowercase();
            if let Some(other) = table.to_local.get(&key) {
                bail!("{local:?} and {other:?} both map to source name {source:?}");
            }

            table.to_local.insert(key, local.clone());
            table.to_source.insert(local, source);
        }
        Ok(table)
    }

    pub fn source_name(&self, local: &str) -> Option<&str> {
        self.to_source.get(local).map(String::as_str)
    }

    /// Zpětný směr, bez ohledu na velikost písmen
    pub fn local_name(&self, source: &str) -> Option<&str> {
        self.to_local.get(&source.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.to_source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_source.is_empty()
    }

    /// Fail fast: chybějící alias by jinak tiše skončil jako "not found"
    pub fn ensure_covers<'a>(&self, locals: impl IntoIterator<Item = &'a str>) -> Result<()> {
        let mut missing: Vec<&str> = locals
            .into_iter()
            .filter(|l| !self.to_source.contains_key(*l))
            .collect();
        missing.sort_unstable();
        missing.dedup();

        if !missing.is_empty() {
            bail!("alias table has no entry for: {}", missing.join(", "));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_work_both_ways() {
        let table = AliasTable::new([("Italia", "Italy"), ("Chipre", "Cyprus")]).unwrap();
        assert_eq!(table.source_name("Italia"), Some("Italy"));
        assert_eq!(table.local_name("Italy"), Some("Italia"));
        assert_eq!(table.local_name("CYPRUS"), Some("Chipre"));
        assert_eq!(table.source_name("Francia"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn rejects_duplicate_local_and_shared_source() {
        assert!(AliasTable::new([("Italia", "Italy"), ("Italia", "Italia")]).is_err());
        assert!(AliasTable::new([("Italia", "Italy"), ("Itálie", "italy")]).is_err());
        assert!(AliasTable::new([("Italia", " ")]).is_err());
    }

    #[test]
    fn ensure_covers_lists_missing_names() {
        let table = AliasTable::new([("Italia", "Italy")]).unwrap();
        assert!(table.ensure_covers(["Italia"]).is_ok());

        let err = table.ensure_covers(["Italia", "Grecia", "Chipre"]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Chipre"));
        assert!(msg.contains("Grecia"));
    }
}
