//! Configuração do bot carregada de `homework_bot.toml` e do ambiente.
//!
//! A struct [`BotConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! As variáveis `YAP_TOKEN`, `TG_TOKEN` e `TG_ID` têm precedência sobre o
//! arquivo; elas podem vir do ambiente do processo ou de um arquivo `.env`,
//! e o ambiente vence o `.env`.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Nome do arquivo de configuração procurado no diretório atual.
pub const CONFIG_FILE: &str = "homework_bot.toml";

/// Arquivo `.env` opcional com as variáveis de credenciais.
pub const DOTENV_FILE: &str = ".env";

pub const PRACTICUM_TOKEN_VAR: &str = "YAP_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TG_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TG_ID";

/// Configuração de nível superior, construída uma única vez na inicialização.
#[derive(Clone, Deserialize)]
pub struct BotConfig {
    /// Token OAuth da API do Practicum.
    #[serde(default)]
    pub practicum_token: String,

    /// Token do bot do Telegram.
    #[serde(default)]
    pub telegram_token: String,

    /// Identificador do chat de destino.
    #[serde(default)]
    pub telegram_chat_id: String,

    /// Intervalo entre ciclos de consulta, em segundos.
    #[serde(default = "default_retry_time_secs")]
    pub retry_time_secs: u64,

    /// URL do endpoint de status das lições de casa.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// URL base da API de bots do Telegram.
    #[serde(default = "default_telegram_api_url")]
    pub telegram_api_url: String,
}

// Valor padrão para o intervalo: 600 segundos.
fn default_retry_time_secs() -> u64 {
    600
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            practicum_token: String::new(),
            telegram_token: String::new(),
            telegram_chat_id: String::new(),
            retry_time_secs: default_retry_time_secs(),
            endpoint: default_endpoint(),
            telegram_api_url: default_telegram_api_url(),
        }
    }
}

// Tokens nunca aparecem nos logs.
impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &str) -> &'static str {
            if value.is_empty() { "<unset>" } else { "<redacted>" }
        }
        f.debug_struct("BotConfig")
            .field("practicum_token", &redact(&self.practicum_token))
            .field("telegram_token", &redact(&self.telegram_token))
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("retry_time_secs", &self.retry_time_secs)
            .field("endpoint", &self.endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .finish()
    }
}

impl BotConfig {
    /// Carrega a configuração de `homework_bot.toml`, do `.env` e do
    /// ambiente do processo.
    pub fn load() -> Result<Self, ConfigError> {
        let dotenv = read_dotenv(Path::new(DOTENV_FILE))?;
        Self::from_sources(Path::new(CONFIG_FILE), |key| {
            std::env::var(key)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .or_else(|| dotenv.get(key).cloned())
        })
    }

    /// Lê o arquivo (se existir) e aplica as variáveis fornecidas por `env`.
    /// Variáveis vazias não sobrescrevem o arquivo.
    pub fn from_sources(
        path: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<BotConfig>(&contents)?
        } else {
            Self::default()
        };

        let overrides = [
            (PRACTICUM_TOKEN_VAR, &mut config.practicum_token),
            (TELEGRAM_TOKEN_VAR, &mut config.telegram_token),
            (TELEGRAM_CHAT_ID_VAR, &mut config.telegram_chat_id),
        ];
        for (key, slot) in overrides {
            if let Some(value) = env(key)
                && !value.trim().is_empty()
            {
                *slot = value.trim().to_string();
            }
        }

        Ok(config)
    }

    /// Verifica que os três valores obrigatórios estão presentes.
    /// Todos são exigidos; basta um ausente para falhar.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            (PRACTICUM_TOKEN_VAR, &self.practicum_token),
            (TELEGRAM_TOKEN_VAR, &self.telegram_token),
            (TELEGRAM_CHAT_ID_VAR, &self.telegram_chat_id),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Missing(key));
            }
        }
        if self.retry_time_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "retry_time_secs",
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Intervalo de espera entre ciclos.
    pub fn retry_time(&self) -> Duration {
        Duration::from_secs(self.retry_time_secs)
    }
}

/// Lê pares `CHAVE=valor` de um arquivo `.env` sem alterar o ambiente do
/// processo. Arquivo ausente resulta em mapa vazio.
pub fn read_dotenv(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let mut vars = HashMap::new();
    for pair in dotenvy::from_path_iter(path)? {
        let (key, value) = pair?;
        vars.insert(key, value);
    }
    Ok(vars)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn full_env() -> impl Fn(&str) -> Option<String> {
        env_from(&[
            ("YAP_TOKEN", "y0_practicum"),
            ("TG_TOKEN", "123:telegram"),
            ("TG_ID", "42"),
        ])
    }

    #[test]
    fn default_config_values() {
        let config = BotConfig::default();
        assert_eq!(config.retry_time_secs, 600);
        assert_eq!(config.retry_time(), Duration::from_secs(600));
        assert_eq!(
            config.endpoint,
            "https://practicum.yandex.ru/api/user_api/homework_statuses/"
        );
        assert!(config.practicum_token.is_empty());
    }

    #[test]
    fn env_values_fill_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = BotConfig::from_sources(&dir.path().join(CONFIG_FILE), full_env()).unwrap();
        assert_eq!(config.practicum_token, "y0_practicum");
        assert_eq!(config.telegram_token, "123:telegram");
        assert_eq!(config.telegram_chat_id, "42");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_takes_precedence_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            r#"
                practicum_token = "from-file"
                telegram_chat_id = "7"
                retry_time_secs = 30
            "#,
        )
        .unwrap();

        let config = BotConfig::from_sources(&path, env_from(&[("YAP_TOKEN", "from-env")])).unwrap();
        assert_eq!(config.practicum_token, "from-env");
        assert_eq!(config.telegram_chat_id, "7");
        assert_eq!(config.retry_time_secs, 30);
        assert_eq!(config.telegram_api_url, "https://api.telegram.org");
    }

    #[test]
    fn blank_env_value_does_not_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "telegram_token = \"file-token\"\n").unwrap();

        let config = BotConfig::from_sources(&path, env_from(&[("TG_TOKEN", "   ")])).unwrap();
        assert_eq!(config.telegram_token, "file-token");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "retry_time_secs = \"soon\"\n").unwrap();

        let err = BotConfig::from_sources(&path, full_env()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn each_missing_value_fails_validation() {
        for missing in ["YAP_TOKEN", "TG_TOKEN", "TG_ID"] {
            let dir = tempfile::tempdir().unwrap();
            let pairs: Vec<(&str, &str)> = [("YAP_TOKEN", "a"), ("TG_TOKEN", "b"), ("TG_ID", "c")]
                .into_iter()
                .filter(|(k, _)| *k != missing)
                .collect();
            let config =
                BotConfig::from_sources(&dir.path().join(CONFIG_FILE), env_from(&pairs)).unwrap();
            match config.validate() {
                Err(ConfigError::Missing(key)) => assert_eq!(key, missing),
                other => panic!("expected Missing({missing}), got {other:?}"),
            }
        }
    }

    #[test]
    fn whitespace_only_value_counts_as_missing() {
        let config = BotConfig {
            practicum_token: "token".into(),
            telegram_token: "token".into(),
            telegram_chat_id: "  ".into(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Missing("TG_ID"))));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = BotConfig {
            practicum_token: "a".into(),
            telegram_token: "b".into(),
            telegram_chat_id: "c".into(),
            retry_time_secs: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn dotenv_file_supplies_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let dotenv_path = dir.path().join(DOTENV_FILE);
        std::fs::write(
            &dotenv_path,
            "# tokens\nYAP_TOKEN=y0_from_dotenv\nTG_TOKEN=\"123:quoted\"\nTG_ID=42\n",
        )
        .unwrap();

        let vars = read_dotenv(&dotenv_path).unwrap();
        let config = BotConfig::from_sources(&dir.path().join(CONFIG_FILE), |key: &str| {
            vars.get(key).cloned()
        })
        .unwrap();

        assert_eq!(config.practicum_token, "y0_from_dotenv");
        assert_eq!(config.telegram_token, "123:quoted");
        assert_eq!(config.telegram_chat_id, "42");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_dotenv_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_dotenv(&dir.path().join(DOTENV_FILE)).unwrap().is_empty());
    }

    #[test]
    fn malformed_dotenv_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DOTENV_FILE);
        std::fs::write(&path, "YAP_TOKEN='unterminated\n").unwrap();

        assert!(matches!(read_dotenv(&path), Err(ConfigError::Dotenv(_))));
    }

    #[test]
    fn debug_output_redacts_tokens() {
        let config = BotConfig {
            practicum_token: "secret-practicum".into(),
            telegram_token: "secret-telegram".into(),
            ..Default::default()
        };
        let printed = format!("{config:?}");
        assert!(!printed.contains("secret-practicum"));
        assert!(!printed.contains("secret-telegram"));
        assert!(printed.contains("<redacted>"));
    }
}
