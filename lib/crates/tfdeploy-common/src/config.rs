use serde::Deserialize;

/// Default Terraform Cloud API root.
pub const DEFAULT_TERRAFORM_API_URL: &str = "https://app.terraform.io/api/v2";

/// Default chat-completions endpoint on the Hugging Face router.
pub const DEFAULT_HF_API_URL: &str = "https://router.huggingface.co/v1/chat/completions";

/// Default model routed through the Hugging Face router.
pub const DEFAULT_HF_MODEL: &str = "openai/gpt-oss-120b:groq";

/// Credentials and platform coordinates, read from unprefixed env vars
/// (`TERRAFORM_TOKEN`, `TERRAFORM_ORG_NAME`, `TERRAFORM_WORKSPACE`,
/// `HF_TOKEN`, `LLM_PROVIDER`).
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformSettings {
    #[serde(default)]
    pub terraform_token: Option<String>,

    #[serde(default)]
    pub terraform_org_name: Option<String>,

    /// Workspace used when a plan request does not name one.
    #[serde(default)]
    pub terraform_workspace: Option<String>,

    #[serde(default)]
    pub hf_token: Option<String>,

    /// Only `hf` is supported.
    #[serde(default = "default_llm_provider")]
    pub llm_provider: String,
}

/// Server settings, read from `TFDEPLOY_*` env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Listen address (default: 0.0.0.0:8080)
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Valkey URL for the workspace registry. In-memory registry when unset.
    #[serde(default)]
    pub valkey_url: Option<String>,

    #[serde(default = "default_terraform_api_url")]
    pub terraform_api_url: String,

    #[serde(default = "default_hf_api_url")]
    pub hf_api_url: String,

    #[serde(default = "default_hf_model")]
    pub hf_model: String,

    /// `plain` or `auto-apply`.
    #[serde(default = "default_workspace_policy")]
    pub workspace_policy: String,

    /// `manual` or `auto`.
    #[serde(default = "default_run_policy")]
    pub run_policy: String,

    #[serde(default = "default_api_timeout_secs")]
    pub api_timeout_secs: u64,

    #[serde(default = "default_upload_timeout_secs")]
    pub upload_timeout_secs: u64,

    #[serde(default = "default_generation_timeout_secs")]
    pub generation_timeout_secs: u64,

    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}

fn default_llm_provider() -> String {
    "hf".to_string()
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_terraform_api_url() -> String {
    DEFAULT_TERRAFORM_API_URL.to_string()
}

fn default_hf_api_url() -> String {
    DEFAULT_HF_API_URL.to_string()
}

fn default_hf_model() -> String {
    DEFAULT_HF_MODEL.to_string()
}

fn default_workspace_policy() -> String {
    "plain".to_string()
}

fn default_run_policy() -> String {
    "manual".to_string()
}

fn default_api_timeout_secs() -> u64 {
    30
}

fn default_upload_timeout_secs() -> u64 {
    60
}

fn default_generation_timeout_secs() -> u64 {
    60
}

fn default_session_ttl_secs() -> u64 {
    12 * 60 * 60
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            terraform_token: None,
            terraform_org_name: None,
            terraform_workspace: None,
            hf_token: None,
            llm_provider: default_llm_provider(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            valkey_url: None,
            terraform_api_url: default_terraform_api_url(),
            hf_api_url: default_hf_api_url(),
            hf_model: default_hf_model(),
            workspace_policy: default_workspace_policy(),
            run_policy: default_run_policy(),
            api_timeout_secs: default_api_timeout_secs(),
            upload_timeout_secs: default_upload_timeout_secs(),
            generation_timeout_secs: default_generation_timeout_secs(),
            session_ttl_secs: default_session_ttl_secs(),
        }
    }
}
