//! Tipos de dados para o método `sendMessage` da API de bots do Telegram.

use serde::{Deserialize, Serialize};

/// Corpo da requisição para `sendMessage`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    /// Identificador do chat ou `@username` do canal.
    pub chat_id: String,
    /// Texto da mensagem.
    pub text: String,
}

/// Envelope comum das respostas da API do Telegram.
///
/// O campo `result` é ignorado; só interessa saber se o envio foi aceito.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
}
