use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Provider settings collected on the welcome screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfiguration {
    #[serde(default)]
    pub api_provider: Option<String>,
    #[serde(default)]
    pub api_model_id: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Webview → host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WebviewMessage {
    ApiConfiguration {
        #[serde(rename = "apiConfiguration")]
        api_configuration: ApiConfiguration,
    },
    SubscribeEmail {
        text: String,
    },
}

/// Host → webview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ExtensionMessage {
    EmailSubscribed,
    /// Any message this view does not handle
    #[serde(other)]
    Other,
}

/// Checks an API configuration. `None` means valid, otherwise a message for the user.
pub trait ApiConfigValidator {
    fn validate(&self, config: &ApiConfiguration) -> Option<String>;
}

impl<F> ApiConfigValidator for F
where
    F: Fn(&ApiConfiguration) -> Option<String>,
{
    fn validate(&self, config: &ApiConfiguration) -> Option<String> {
        self(config)
    }
}

/// Requires a provider, plus an API key (hosted providers) or base URL (local providers)
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredFieldsValidator;

const LOCAL_PROVIDERS: &[&str] = &["ollama", "lmstudio"];

impl ApiConfigValidator for RequiredFieldsValidator {
    fn validate(&self, config: &ApiConfiguration) -> Option<String> {
        let provider = match non_empty(&config.api_provider) {
            Some(p) => p,
            None => return Some("You must select an API provider.".to_string()),
        };

        if LOCAL_PROVIDERS.contains(&provider.to_ascii_lowercase().as_str()) {
            if non_empty(&config.base_url).is_none() && non_empty(&config.api_model_id).is_none() {
                return Some("You must provide a base URL or model ID.".to_string());
            }
            return None;
        }

        if non_empty(&config.api_key).is_none() {
            return Some("You must provide a valid API key or choose a different provider.".to_string());
        }
        None
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    Unsubscribed,
    Subscribed,
}

/// Host end of the welcome view's message channel
pub struct HostChannel {
    pub from_view: mpsc::UnboundedReceiver<WebviewMessage>,
    pub to_view: mpsc::UnboundedSender<ExtensionMessage>,
}

/// Onboarding form state
pub struct WelcomeView<V> {
    validator: V,
    api_configuration: ApiConfiguration,
    api_error: Option<String>,
    email: String,
    subscription: SubscriptionState,
    outbound: mpsc::UnboundedSender<WebviewMessage>,
    inbound: mpsc::UnboundedReceiver<ExtensionMessage>,
}

impl<V: ApiConfigValidator> WelcomeView<V> {
    /// Create the view together with the host's end of the channel
    pub fn new(validator: V, api_configuration: ApiConfiguration) -> (Self, HostChannel) {
        let (outbound, from_view) = mpsc::unbounded_channel();
        let (to_view, inbound) = mpsc::unbounded_channel();

        let api_error = validator.validate(&api_configuration);
        let view = Self {
            validator,
            api_configuration,
            api_error,
            email: String::new(),
            subscription: SubscriptionState::Unsubscribed,
            outbound,
            inbound,
        };

        (view, HostChannel { from_view, to_view })
    }

    pub fn api_configuration(&self) -> &ApiConfiguration {
        &self.api_configuration
    }

    /// Replace the configuration and re-run validation
    pub fn set_api_configuration(&mut self, config: ApiConfiguration) {
        self.api_error = self.validator.validate(&config);
        self.api_configuration = config;
    }

    pub fn api_error(&self) -> Option<&str> {
        self.api_error.as_deref()
    }

    pub fn can_submit(&self) -> bool {
        self.api_error.is_none()
    }

    /// Post the configuration to the host. Returns `false` without sending when invalid.
    pub fn submit(&self) -> Result<bool> {
        if let Some(error) = &self.api_error {
            warn!("Not submitting invalid API configuration: {}", error);
            return Ok(false);
        }

        self.post(WebviewMessage::ApiConfiguration {
            api_configuration: self.api_configuration.clone(),
        })?;
        Ok(true)
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn subscription(&self) -> SubscriptionState {
        self.subscription
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription == SubscriptionState::Subscribed
    }

    /// Ask the host to subscribe the entered email. Returns `false` when there is nothing to send.
    pub fn subscribe(&self) -> Result<bool> {
        let email = self.email.trim();
        if self.is_subscribed() || email.is_empty() {
            return Ok(false);
        }

        self.post(WebviewMessage::SubscribeEmail {
            text: email.to_string(),
        })?;
        Ok(true)
    }

    /// Apply one host message to the view state
    pub fn handle_message(&mut self, message: &ExtensionMessage) {
        match message {
            ExtensionMessage::EmailSubscribed => {
                if self.is_subscribed() {
                    debug!("Already subscribed, ignoring emailSubscribed");
                    return;
                }
                info!("Email subscription confirmed");
                self.subscription = SubscriptionState::Subscribed;
                self.email.clear();
            }
            ExtensionMessage::Other => {
                debug!("Ignoring message not handled by the welcome view");
            }
        }
    }

    /// Wait for the next host message and apply it. `None` once the host has gone away.
    pub async fn next_message(&mut self) -> Option<ExtensionMessage> {
        let message = self.inbound.recv().await?;
        self.handle_message(&message);
        Some(message)
    }

    fn post(&self, message: WebviewMessage) -> Result<()> {
        debug!(?message, "Posting message to host");
        self.outbound
            .send(message)
            .ok()
            .context("Host channel is closed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_config() -> ApiConfiguration {
        ApiConfiguration {
            api_provider: Some("anthropic".to_string()),
            api_model_id: Some("claude-sonnet-4-5".to_string()),
            api_key: Some("sk-test".to_string()),
            base_url: None,
        }
    }

    #[test]
    fn test_message_wire_format() {
        let msg = WebviewMessage::SubscribeEmail {
            text: "dev@example.com".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({ "type": "subscribeEmail", "text": "dev@example.com" })
        );

        let msg = WebviewMessage::ApiConfiguration {
            api_configuration: valid_config(),
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "apiConfiguration");
        assert_eq!(value["apiConfiguration"]["apiProvider"], "anthropic");
        assert_eq!(value["apiConfiguration"]["apiKey"], "sk-test");

        let inbound: ExtensionMessage =
            serde_json::from_value(json!({ "type": "emailSubscribed" })).unwrap();
        assert_eq!(inbound, ExtensionMessage::EmailSubscribed);

        let other: ExtensionMessage = serde_json::from_value(json!({ "type": "state" })).unwrap();
        assert_eq!(other, ExtensionMessage::Other);
    }

    #[test]
    fn test_required_fields_validator() {
        let v = RequiredFieldsValidator;
        assert_eq!(v.validate(&valid_config()), None);

        assert!(v.validate(&ApiConfiguration::default()).is_some());

        let missing_key = ApiConfiguration {
            api_key: Some("  ".to_string()),
            ..valid_config()
        };
        assert!(v.validate(&missing_key).unwrap().contains("API key"));

        let local = ApiConfiguration {
            api_provider: Some("ollama".to_string()),
            base_url: Some("http://localhost:11434".to_string()),
            ..Default::default()
        };
        assert_eq!(v.validate(&local), None);
    }

    #[test]
    fn test_email_subscribed_transitions_and_clears_email() {
        let (mut view, _host) = WelcomeView::new(RequiredFieldsValidator, valid_config());
        view.set_email("dev@example.com");
        assert_eq!(view.subscription(), SubscriptionState::Unsubscribed);

        view.handle_message(&ExtensionMessage::EmailSubscribed);
        assert_eq!(view.subscription(), SubscriptionState::Subscribed);
        assert_eq!(view.email(), "");
    }

    #[test]
    fn test_email_subscribed_is_idempotent() {
        let (mut view, _host) = WelcomeView::new(RequiredFieldsValidator, valid_config());
        view.handle_message(&ExtensionMessage::EmailSubscribed);
        view.set_email("typed-after@example.com");

        view.handle_message(&ExtensionMessage::EmailSubscribed);
        assert!(view.is_subscribed());
        assert_eq!(view.email(), "typed-after@example.com");
    }

    #[test]
    fn test_subscribe_requires_email() {
        let (mut view, mut host) = WelcomeView::new(RequiredFieldsValidator, valid_config());
        assert!(!view.subscribe().unwrap());
        assert!(host.from_view.try_recv().is_err());

        view.set_email("dev@example.com");
        assert!(view.subscribe().unwrap());
        assert_eq!(
            host.from_view.try_recv().unwrap(),
            WebviewMessage::SubscribeEmail {
                text: "dev@example.com".to_string()
            }
        );
    }

    #[test]
    fn test_subscribe_sends_trimmed_email() {
        let (mut view, mut host) = WelcomeView::new(RequiredFieldsValidator, valid_config());

        view.set_email("   ");
        assert!(!view.subscribe().unwrap());
        assert!(host.from_view.try_recv().is_err());

        view.set_email("  dev@example.com ");
        assert!(view.subscribe().unwrap());
        assert_eq!(
            host.from_view.try_recv().unwrap(),
            WebviewMessage::SubscribeEmail {
                text: "dev@example.com".to_string()
            }
        );
    }

    #[test]
    fn test_submit_gated_by_validation() {
        let (mut view, mut host) =
            WelcomeView::new(RequiredFieldsValidator, ApiConfiguration::default());
        assert!(!view.can_submit());
        assert!(view.api_error().is_some());
        assert!(!view.submit().unwrap());
        assert!(host.from_view.try_recv().is_err());

        view.set_api_configuration(valid_config());
        assert!(view.can_submit());
        assert!(view.submit().unwrap());
        assert_eq!(
            host.from_view.try_recv().unwrap(),
            WebviewMessage::ApiConfiguration {
                api_configuration: valid_config()
            }
        );
    }

    #[test]
    fn test_closure_validator() {
        let (view, _host) = WelcomeView::new(
            |_: &ApiConfiguration| Some("always invalid".to_string()),
            valid_config(),
        );
        assert_eq!(view.api_error(), Some("always invalid"));
    }

    #[test]
    fn test_post_fails_when_host_dropped() {
        let (mut view, host) = WelcomeView::new(RequiredFieldsValidator, valid_config());
        drop(host);
        view.set_email("dev@example.com");
        assert!(view.subscribe().is_err());
    }

    #[tokio::test]
    async fn test_next_message_applies_host_messages() {
        let (mut view, host) = WelcomeView::new(RequiredFieldsValidator, valid_config());
        view.set_email("dev@example.com");

        host.to_view.send(ExtensionMessage::Other).unwrap();
        host.to_view.send(ExtensionMessage::EmailSubscribed).unwrap();
        drop(host);

        assert_eq!(view.next_message().await, Some(ExtensionMessage::Other));
        assert!(!view.is_subscribed());

        assert_eq!(
            view.next_message().await,
            Some(ExtensionMessage::EmailSubscribed)
        );
        assert!(view.is_subscribed());
        assert_eq!(view.email(), "");

        assert_eq!(view.next_message().await, None);
    }
}
