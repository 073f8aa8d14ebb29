use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{ClassifierUnavailable, FallbackClassifier, RankedLabel};
use crate::config::ClassifierConfig;

/// Blocking client for the HuggingFace zero-shot classification endpoint.
///
/// A missing API key short-circuits every call to
/// [`ClassifierUnavailable::MissingCredential`] without touching the network.
pub struct HuggingFaceClassifier {
    client: reqwest::blocking::Client,
    url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Debug, Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [&'a str],
    multi_label: bool,
}

/// The inference API has answered in both a column-oriented and a row-oriented shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ZeroShotResponse {
    Columns { labels: Vec<String>, scores: Vec<f64> },
    Rows(Vec<RankedLabel>),
}

impl HuggingFaceClassifier {
    /// Builds the HTTP client. Must not be called from inside an async task.
    pub fn new(config: &ClassifierConfig) -> Result<Self, ClassifierUnavailable> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| ClassifierUnavailable::Transport(err.to_string()))?;

        Ok(Self {
            client,
            url: config.model_url(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

impl std::fmt::Debug for HuggingFaceClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFaceClassifier")
            .field("url", &self.url)
            .field("has_credential", &self.has_credential())
            .finish_non_exhaustive()
    }
}

impl FallbackClassifier for HuggingFaceClassifier {
    fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
    ) -> Result<Vec<RankedLabel>, ClassifierUnavailable> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ClassifierUnavailable::MissingCredential)?;

        let request = ZeroShotRequest {
            inputs: text,
            parameters: ZeroShotParameters {
                candidate_labels,
                multi_label: false,
            },
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifierUnavailable::Status(status.as_u16()));
        }

        let body = response
            .json::<ZeroShotResponse>()
            .map_err(|err| ClassifierUnavailable::MalformedResponse(err.to_string()))?;

        rank_response(body)
    }
}

fn map_transport_error(err: reqwest::Error) -> ClassifierUnavailable {
    if err.is_timeout() {
        ClassifierUnavailable::Timeout
    } else {
        ClassifierUnavailable::Transport(err.to_string())
    }
}

/// Normalizes either response shape into labels sorted best-first.
pub(crate) fn rank_response(
    response: ZeroShotResponse,
) -> Result<Vec<RankedLabel>, ClassifierUnavailable> {
    let mut ranked = match response {
        ZeroShotResponse::Columns { labels, scores } => {
            if labels.len() != scores.len() {
                return Err(ClassifierUnavailable::MalformedResponse(format!(
                    "{} labels but {} scores",
                    labels.len(),
                    scores.len()
                )));
            }
            labels
                .into_iter()
                .zip(scores)
                .map(|(label, score)| RankedLabel { label, score })
                .collect::<Vec<_>>()
        }
        ZeroShotResponse::Rows(rows) => rows,
    };

    if ranked.is_empty() {
        return Err(ClassifierUnavailable::MalformedResponse(
            "no ranked labels".to_string(),
        ));
    }

    ranked.sort_by(|left, right| right.score.total_cmp(&left.score));
    Ok(ranked)
}
