use std::sync::Arc;

use crate::settings::Settings;

use super::provider::BidAdapter;

/// Type alias for adapter builder functions.
type AdapterBuilder = fn(&Settings) -> Vec<Arc<dyn BidAdapter>>;

/// Returns the list of all available adapter builder functions.
///
/// Each builder checks the settings for its own configuration and returns
/// the adapters it enables.
fn adapter_builders() -> &'static [AdapterBuilder] {
    &[crate::integrations::playgroundxyz::register_adapters]
}

/// Adapters enabled for the current settings, addressable by partner code.
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: Vec<Arc<dyn BidAdapter>>,
}

impl AdapterRegistry {
    /// Build a registry from every adapter enabled in `settings`.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        log::info!("Building bid adapter registry");

        let mut registry = Self::default();
        for builder in adapter_builders() {
            for adapter in builder(settings) {
                registry.register(adapter);
            }
        }

        log::info!(
            "Bid adapter registry built with {} adapters",
            registry.len()
        );

        registry
    }

    pub fn register(&mut self, adapter: Arc<dyn BidAdapter>) {
        log::debug!("Registering bid adapter '{}'", adapter.code());
        self.adapters.push(adapter);
    }

    /// Resolve an adapter by its code or one of its aliases.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<Arc<dyn BidAdapter>> {
        self.adapters
            .iter()
            .find(|adapter| {
                adapter.code() == code || adapter.aliases().iter().any(|alias| *alias == code)
            })
            .cloned()
    }

    /// Codes of all registered adapters, in registration order.
    #[must_use]
    pub fn codes(&self) -> Vec<&'static str> {
        self.adapters.iter().map(|adapter| adapter.code()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BIDDER_CODE;
    use crate::test_support::tests::create_test_settings;

    #[test]
    fn registers_enabled_adapter() {
        let registry = AdapterRegistry::from_settings(&create_test_settings());

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.codes(), vec![BIDDER_CODE]);

        let adapter = registry.get(BIDDER_CODE).expect("should resolve adapter");
        assert_eq!(adapter.code(), BIDDER_CODE);
    }

    #[test]
    fn disabled_adapter_is_not_registered() {
        let mut settings = create_test_settings();
        settings.adapter.enabled = false;

        let registry = AdapterRegistry::from_settings(&settings);
        assert!(registry.is_empty());
        assert!(registry.get(BIDDER_CODE).is_none());
    }

    #[test]
    fn unknown_code_is_not_resolved() {
        let registry = AdapterRegistry::from_settings(&create_test_settings());
        assert!(registry.get("appnexus").is_none());
    }
}
