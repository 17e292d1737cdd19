//! Client wiring against a [`MockApi`](super::mock_api::MockApi)

use std::sync::Arc;

use secp_auth::CredentialStore;
use secp_client::ApiClient;
use secp_i18n::{DEFAULT_LOCALE, DictionaryCache, HttpDictionaryLoader};
use secrecy::SecretString;

use super::mock_api::MockApi;

/// Dictionary cache that fetches from the mock
pub fn dictionary_cache(mock: &MockApi) -> DictionaryCache {
    let loader =
        HttpDictionaryLoader::new(reqwest::Client::new(), &mock.base_url(), "/ui/i18n", DEFAULT_LOCALE).unwrap();
    DictionaryCache::new(Arc::new(loader))
}

/// Client with the given credential store and a fresh dictionary cache
pub fn api_client(mock: &MockApi, credentials: CredentialStore) -> ApiClient {
    ApiClient::new(mock.base_url(), credentials, dictionary_cache(mock)).unwrap()
}

pub fn signed_in(credentials: &CredentialStore, token: &str) {
    credentials.set(&SecretString::from(token.to_owned())).unwrap();
}
