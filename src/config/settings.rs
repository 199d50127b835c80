use serde::{Deserialize, Serialize};

/// Per-client options. `signed_registers` is the one flag the protocol
/// exposes; it is carried here rather than as process-wide mutable
/// state, so two clients in the same process may disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientOptions {
    pub signed_registers: bool,
    pub unit_id: u8,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            signed_registers: false,
            unit_id: 1,
        }
    }
}

/// Seeds a fresh [`ClientOptions`] from the environment, layering
/// `MODBUS_CLIENT_*` variables over the built-in defaults the same way
/// the teacher's relay configuration layers environment variables over
/// its own defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub client: ClientOptions,
}

impl Settings {
    pub fn load() -> Result<Self, config::ConfigError> {
        // `separator("__")`, not `"_"`: a single underscore can't be
        // distinguished from the underscores already inside field names
        // like `signed_registers`, so a plain `"_"` either fails to
        // apply the override or (with `deny_unknown_fields`) makes this
        // return an error whenever the variable is set at all. The
        // teacher's own `config/relay.rs` hits the identical ambiguity
        // for its nested structs and resolves it the same way.
        let source = config::Config::builder()
            .set_default("signed_registers", false)?
            .set_default("unit_id", 1)?
            .add_source(
                config::Environment::with_prefix("MODBUS_CLIENT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        let client: ClientOptions = source.try_deserialize()?;
        Ok(Self { client })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            client: ClientOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    // `Settings::load` reads process-wide environment variables; these
    // tests serialize on this lock so they don't race each other.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn default_options_are_unsigned_and_unit_one() {
        let options = ClientOptions::default();
        assert!(!options.signed_registers);
        assert_eq!(options.unit_id, 1);
    }

    #[test]
    fn load_without_env_overrides_matches_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("MODBUS_CLIENT_SIGNED_REGISTERS");
        std::env::remove_var("MODBUS_CLIENT_UNIT_ID");
        let settings = Settings::load().unwrap();
        assert_eq!(settings.client, ClientOptions::default());
    }

    #[test]
    fn load_honors_the_signed_registers_env_override() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("MODBUS_CLIENT_SIGNED_REGISTERS", "true");
        let settings = Settings::load();
        std::env::remove_var("MODBUS_CLIENT_SIGNED_REGISTERS");

        let settings = settings.unwrap();
        assert!(settings.client.signed_registers);
        assert_eq!(settings.client.unit_id, 1);
    }
}
