use crate::cons::provider_cons::ProviderKind;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_openai_hosts_in_any_case() {
        for url in [
            "https://api.openai.com/v1/chat/completions",
            "http://openai.com/foo",
            "https://API.OpenAI.COM/v1/chat/completions",
            "https://my-proxy.openai.com:8443/v1",
        ] {
            assert_eq!(ProviderKind::from_endpoint(url), ProviderKind::OpenAI, "{url}");
        }
    }

    #[test]
    fn classifies_gemini_hosts() {
        for url in [
            "https://generativelanguage.googleapis.com/v1beta/models",
            "http://generativelanguage.googleapis.com/anything",
            "https://GenerativeLanguage.GoogleAPIs.com/v1beta/models/gemini-pro:generateContent",
        ] {
            assert_eq!(ProviderKind::from_endpoint(url), ProviderKind::Gemini, "{url}");
        }
    }

    #[test]
    fn classifies_ollama_and_localhost() {
        for url in [
            "http://localhost:8080/v1/models",
            "http://localhost:11434/api/generate",
            "https://ollama.ai/models",
            "http://my-ollama-server.local/api",
        ] {
            assert_eq!(ProviderKind::from_endpoint(url), ProviderKind::Ollama, "{url}");
        }
    }

    #[test]
    fn earlier_rules_win_for_ambiguous_hosts() {
        assert_eq!(
            ProviderKind::from_endpoint("https://ollama.openai.com/api"),
            ProviderKind::OpenAI
        );
        assert_eq!(
            ProviderKind::from_endpoint("https://localhost.generativelanguage.googleapis.com/"),
            ProviderKind::Gemini
        );
    }

    #[test]
    fn only_the_host_is_inspected() {
        assert_eq!(
            ProviderKind::from_endpoint("https://example.com/openai.com/v1"),
            ProviderKind::Unknown
        );
        assert_eq!(
            ProviderKind::from_endpoint("https://example.com/?q=localhost"),
            ProviderKind::Unknown
        );
    }

    #[test]
    fn everything_else_is_unknown() {
        for url in [
            "https://example.com/api",
            "",
            "   ",
            "not a url",
            "api.openai.com/v1/chat/completions",
            "ftp://generativelanguage.COM",
        ] {
            assert_eq!(ProviderKind::from_endpoint(url), ProviderKind::Unknown, "{url:?}");
        }
    }

    #[test]
    fn provider_names_match_display() {
        for kind in [
            ProviderKind::OpenAI,
            ProviderKind::Gemini,
            ProviderKind::Ollama,
            ProviderKind::Unknown,
        ] {
            assert_eq!(kind.to_string(), kind.provider_name());
        }
        assert_eq!(ProviderKind::OpenAI.provider_name(), "openai");
        assert!(!ProviderKind::Unknown.is_supported());
        assert!(ProviderKind::Ollama.is_supported());
    }
}
