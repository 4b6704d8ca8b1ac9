/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: token 検証, http: request id / trace / limit / timeout, cors, security_headers
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
