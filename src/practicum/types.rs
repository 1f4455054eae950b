//! Tipos de dados da API de status de lições de casa do Practicum.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::response::json_kind;
use crate::error::CycleError;

/// Um registro de revisão como reportado pela API.
///
/// Campos extras enviados pela API (`id`, `lesson_name`, `reviewer_comment`,
/// `date_updated`) são ignorados.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Homework {
    /// Identificador legível da lição.
    pub homework_name: String,
    /// Código de status bruto (`approved`, `reviewing`, `rejected`).
    pub status: String,
}

impl Homework {
    /// Extrai um [`Homework`] de um item de `homeworks`.
    ///
    /// Retorna [`CycleError::Shape`] se o item não for um objeto com
    /// `homework_name` e `status` do tipo string.
    pub fn from_value(item: &Value) -> Result<Self, CycleError> {
        if !item.is_object() {
            return Err(CycleError::Shape(format!(
                "homework item is {} instead of an object",
                json_kind(item)
            )));
        }
        Homework::deserialize(item).map_err(|e| CycleError::Shape(format!("homework item: {e}")))
    }
}
