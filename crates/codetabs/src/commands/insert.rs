//! `codetabs insert` command implementation.

use std::path::PathBuf;

use clap::Args;
use codetabs_config::{CliSettings, Config};
use codetabs_convert::insert_widget_with;
use codetabs_data::{TabItem, TabsData};
use codetabs_host::{BlockId, JsonFileHost};

use super::Toolkit;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the insert command.
#[derive(Args)]
pub(crate) struct InsertArgs {
    /// Block document to insert into (overrides config).
    #[arg(short, long, env = "CODETABS_STORE")]
    store: Option<PathBuf>,

    /// Insert after this block (default: end of document).
    #[arg(long)]
    after: Option<String>,

    /// Number used in the default tab title (`Tab1`, `Tab2`, ...).
    #[arg(long, default_value_t = 1)]
    index: usize,

    /// Path to configuration file (default: auto-discover codetabs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl InsertArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let cli_settings = CliSettings {
            store_path: self.store.clone(),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let host = JsonFileHost::open(config.require_store_path()?)?;
        let toolkit = Toolkit::new(&config);

        let anchor = self.after.map(BlockId::new);
        let data = new_widget(self.index, &config.editor.placeholder);
        let id = insert_widget_with(&host, &toolkit.renderer(), anchor.as_ref(), &data)?;
        host.save()?;

        output.success(&format!("Inserted widget {id}"));
        output.print(id.as_str());
        Ok(())
    }
}

/// Default widget data with the configured placeholder code.
fn new_widget(index: usize, placeholder: &str) -> TabsData {
    let data = TabsData::create_default(index);
    match data.tabs.first() {
        Some(tab) => {
            let item = TabItem::new(tab.title.clone(), tab.lang.clone(), placeholder);
            data.with_tab_replaced(0, item)
        }
        None => data,
    }
}

#[cfg(test)]
mod tests {
    use codetabs_data::PLACEHOLDER_CODE;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_new_widget_uses_placeholder() {
        let data = new_widget(2, "# your command");
        assert_eq!(data.tabs, vec![TabItem::new("Tab2", "plaintext", "# your command")]);
    }

    #[test]
    fn test_new_widget_default_placeholder() {
        assert_eq!(new_widget(1, PLACEHOLDER_CODE), TabsData::create_default(1));
    }
}
