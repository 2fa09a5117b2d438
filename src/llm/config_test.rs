use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_without_keys_disable_both_providers() {
    let cfg = LlmConfig::from_lookup(lookup(&[])).unwrap();
    assert!(cfg.anthropic.is_none());
    assert!(cfg.openai.is_none());
    assert_eq!(cfg.openai_base_url, DEFAULT_OPENAI_BASE_URL);
    assert_eq!(cfg.max_tokens, DEFAULT_LLM_MAX_TOKENS);
    assert_eq!(
        cfg.timeouts,
        LlmTimeouts { request_secs: DEFAULT_LLM_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_LLM_CONNECT_TIMEOUT_SECS }
    );
}

#[test]
fn anthropic_key_enables_claude_with_default_model() {
    let cfg = LlmConfig::from_lookup(lookup(&[("ANTHROPIC_API_KEY", "sk-ant")])).unwrap();
    let claude = cfg.provider(Provider::Claude).unwrap();
    assert_eq!(claude.api_key, "sk-ant");
    assert_eq!(claude.model, DEFAULT_ANTHROPIC_MODEL);
    assert!(cfg.provider(Provider::OpenAi).is_none());
}

#[test]
fn openai_overrides_are_applied() {
    let cfg = LlmConfig::from_lookup(lookup(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("OPENAI_MODEL", "gpt-test"),
        ("OPENAI_BASE_URL", "https://example.test/v1/"),
        ("LLM_MAX_TOKENS", "1024"),
        ("LLM_REQUEST_TIMEOUT_SECS", "42"),
        ("LLM_CONNECT_TIMEOUT_SECS", "7"),
    ]))
    .unwrap();
    let openai = cfg.provider(Provider::OpenAi).unwrap();
    assert_eq!(openai.model, "gpt-test");
    assert_eq!(cfg.openai_base_url, "https://example.test/v1");
    assert_eq!(cfg.max_tokens, 1024);
    assert_eq!(cfg.timeouts, LlmTimeouts { request_secs: 42, connect_secs: 7 });
}

#[test]
fn blank_key_counts_as_missing() {
    let cfg = LlmConfig::from_lookup(lookup(&[("ANTHROPIC_API_KEY", "  ")])).unwrap();
    assert!(cfg.anthropic.is_none());
}

#[test]
fn invalid_number_is_config_error() {
    let err = LlmConfig::from_lookup(lookup(&[("LLM_MAX_TOKENS", "lots")])).unwrap_err();
    assert!(matches!(err, LlmError::ConfigParse(msg) if msg.contains("LLM_MAX_TOKENS")));
}
