use axum::http::StatusCode;

use super::failure::{AppError, Violation};
use super::response::ErrorResponse;

/// Substituted whenever a detail message is missing or blank
pub const FALLBACK_DETAIL: &str = "inválido";

pub const MALFORMED_BODY_MESSAGE: &str =
    "O corpo da requisição está malformado (JSON inválido) ou contém tipos incompatíveis.";

pub const DATA_CONFLICT_MESSAGE: &str =
    "A operação viola uma restrição de integridade dos dados (unicidade ou chave estrangeira).";

pub const INTERNAL_MESSAGE: &str =
    "Ocorreu um erro inesperado. Se o problema persistir, entre em contato com o suporte.";

/// Map a failure raised while serving `path` to its status and envelope.
///
/// Total over [`AppError`]; never fails. `path` is copied as received.
pub fn translate(failure: &AppError, path: &str) -> (StatusCode, ErrorResponse) {
    let kind = failure.kind();

    let errors = match failure {
        AppError::Validation(violations) | AppError::InvalidParameters(violations) => {
            describe_violations(violations)
        }
        AppError::MalformedBody(_) => vec![MALFORMED_BODY_MESSAGE.to_string()],
        AppError::NotFound(message) | AppError::BusinessRule(message) => {
            vec![detail_or_fallback(Some(message.as_str())).to_string()]
        }
        AppError::DataConflict(_) => vec![DATA_CONFLICT_MESSAGE.to_string()],
        AppError::Internal(_) => vec![INTERNAL_MESSAGE.to_string()],
    };

    let status = kind.status_code();
    (status, ErrorResponse::of(status, kind.title(), errors, path))
}

fn describe_violations(violations: &[Violation]) -> Vec<String> {
    if violations.is_empty() {
        return vec![FALLBACK_DETAIL.to_string()];
    }

    violations
        .iter()
        .map(|v| {
            let detail = detail_or_fallback(v.message.as_deref());
            if v.path.is_empty() {
                // Object-level constraint
                detail.to_string()
            } else {
                format!("{}: {}", v.path, detail)
            }
        })
        .collect()
}

fn detail_or_fallback(message: Option<&str>) -> &str {
    match message {
        Some(m) if !m.trim().is_empty() => m,
        _ => FALLBACK_DETAIL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::response::TIMESTAMP_FORMAT;
    use anyhow::anyhow;
    use chrono::NaiveDateTime;

    #[test]
    fn test_table_status_and_title() {
        let cases = [
            (
                AppError::Validation(vec![Violation::new("nome", "obrigatório")]),
                400,
                "BAD_REQUEST",
                "Erro de validação",
            ),
            (
                AppError::InvalidParameters(vec![Violation::new("id", "deve ser positivo")]),
                400,
                "BAD_REQUEST",
                "Parâmetros inválidos",
            ),
            (
                AppError::MalformedBody("EOF while parsing".into()),
                400,
                "BAD_REQUEST",
                "Corpo da requisição inválido",
            ),
            (AppError::not_found("x"), 404, "NOT_FOUND", "Não encontrado"),
            (AppError::conflict("uk_email"), 409, "CONFLICT", "Conflito de dados"),
            (
                AppError::business_rule("x"),
                422,
                "UNPROCESSABLE_ENTITY",
                "Regra de negócio violada",
            ),
            (
                AppError::internal(anyhow!("boom")),
                500,
                "INTERNAL_SERVER_ERROR",
                "Erro interno",
            ),
        ];

        for (failure, code, status_name, title) in cases {
            let (status, body) = translate(&failure, "/itens");
            assert_eq!(status.as_u16(), code, "{failure:?}");
            assert_eq!(body.code, code);
            assert_eq!(body.status, status_name);
            assert_eq!(body.title, title);
            assert!(!body.errors.is_empty());
        }
    }

    #[test]
    fn test_field_validation_detail() {
        let failure = AppError::Validation(vec![Violation::new("email", "deve ser um e-mail válido")]);
        let (status, body) = translate(&failure, "/usuarios");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.errors, vec!["email: deve ser um e-mail válido"]);
    }

    #[test]
    fn test_missing_message_uses_fallback() {
        let failure = AppError::Validation(vec![
            Violation::unlabeled("nome"),
            Violation::new("descricao", "  "),
        ]);
        let (_, body) = translate(&failure, "/itens");
        assert_eq!(body.errors, vec!["nome: inválido", "descricao: inválido"]);
    }

    #[test]
    fn test_violations_keep_reported_order() {
        let failure = AppError::InvalidParameters(vec![
            Violation::new("listar.tamanho", "deve ser no máximo 100"),
            Violation::new("listar.pagina", "deve ser maior ou igual a 0"),
            Violation::new("buscar.id", "deve ser positivo"),
        ]);
        let (_, body) = translate(&failure, "/itens");
        assert_eq!(
            body.errors,
            vec![
                "listar.tamanho: deve ser no máximo 100",
                "listar.pagina: deve ser maior ou igual a 0",
                "buscar.id: deve ser positivo",
            ]
        );
    }

    #[test]
    fn test_object_level_violation_has_no_field_prefix() {
        let failure = AppError::Validation(vec![Violation::new("", "datas fora de ordem")]);
        let (_, body) = translate(&failure, "/itens");
        assert_eq!(body.errors, vec!["datas fora de ordem"]);
    }

    #[test]
    fn test_empty_violation_list_still_has_detail() {
        let (_, body) = translate(&AppError::Validation(vec![]), "/itens");
        assert_eq!(body.errors, vec![FALLBACK_DETAIL]);
    }

    #[test]
    fn test_not_found_uses_own_message() {
        let (status, body) = translate(&AppError::not_found("Item 42 não encontrado"), "/itens/42");
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.title, "Não encontrado");
        assert_eq!(body.errors, vec!["Item 42 não encontrado"]);
    }

    #[test]
    fn test_business_rule_uses_own_message() {
        let failure = AppError::business_rule("Estoque insuficiente para o item 7");
        let (_, body) = translate(&failure, "/pedidos");
        assert_eq!(body.errors, vec!["Estoque insuficiente para o item 7"]);
    }

    #[test]
    fn test_diagnostics_are_not_exposed() {
        let (_, conflict) = translate(&AppError::conflict("duplicate key uk_itens_nome"), "/itens");
        assert_eq!(conflict.errors, vec![DATA_CONFLICT_MESSAGE]);

        let (_, malformed) =
            translate(&AppError::MalformedBody("expected value at line 1".into()), "/itens");
        assert_eq!(malformed.errors, vec![MALFORMED_BODY_MESSAGE]);

        let (_, internal) = translate(&AppError::internal(anyhow!("attempt to divide by zero")), "/x");
        assert_eq!(internal.errors, vec![INTERNAL_MESSAGE]);
    }

    #[test]
    fn test_path_is_kept_verbatim() {
        let path = "/itens/caf%C3%A9//42/";
        let (_, body) = translate(&AppError::not_found("x"), path);
        assert_eq!(body.path, path);
    }

    #[test]
    fn test_timestamps_parse_and_do_not_decrease() {
        let failure = AppError::not_found("x");
        let (_, first) = translate(&failure, "/a");
        let (_, second) = translate(&failure, "/a");

        let json = serde_json::to_value(&first).unwrap();
        let raw = json["timestamp"].as_str().unwrap();
        assert!(NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).is_ok());

        assert!(second.timestamp >= first.timestamp);
    }
}
