use list_reconciler::types::Record;
use list_reconciler::{Config, VecModel};
use std::str::FromStr;

pub fn record(yaml: &str) -> Record {
    Record::from_str(yaml).unwrap()
}

pub fn model(yaml: &str) -> VecModel {
    VecModel::from_yaml_str(yaml).unwrap()
}

/// Loads the shared model fixture
pub fn fixture_model() -> VecModel {
    let yaml = std::fs::read_to_string("./tests/fixtures/model.yml").unwrap();
    model(&yaml)
}

/// Returns the `type[index]` keys of all records, with `?` for missing parts
pub fn keys(m: &VecModel) -> Vec<String> {
    let c = Config::default();
    m.records()
        .iter()
        .map(|r| {
            let t = r.item_type(&c).unwrap_or("?");
            let i = r
                .item_index(&c)
                .map_or_else(|| "?".to_string(), |i| i.to_string());
            format!("{t}[{i}]")
        })
        .collect()
}

pub fn lasts(m: &VecModel) -> Vec<bool> {
    let c = Config::default();
    m.records().iter().map(|r| r.is_last(&c)).collect()
}
