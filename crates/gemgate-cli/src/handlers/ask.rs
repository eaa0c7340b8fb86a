//! Ask command handler.
//!
//! Runs one native request in-process and prints the reply.

use std::sync::Arc;

use gemgate_core::{
    ChatService, GenerationPort, NativeRequest, RawImageRef, RemoteFetchPort,
};
use gemgate_gemini::{GeminiClient, ReqwestFetcher};
use tracing::debug;

use crate::commands::AskArgs;
use crate::error::CliError;

/// Build the request for `args`.
pub fn build_request(args: &AskArgs) -> NativeRequest {
    let request = NativeRequest::new(args.message.clone(), args.model);
    if args.files.is_empty() {
        request
    } else {
        request.with_files(args.files.iter().map(|f| RawImageRef::from(f.as_str())).collect())
    }
}

/// Execute the ask command.
pub async fn execute(args: &AskArgs) -> Result<String, CliError> {
    let gemini_config = args.service.gemini_config();
    if !gemini_config.has_api_key() {
        return Err(CliError::Config(
            "GEMINI_API_KEY is not set (use --api-key or the environment)".to_string(),
        ));
    }

    let generation: Arc<dyn GenerationPort> =
        Arc::new(GeminiClient::new(gemini_config).map_err(|e| CliError::Config(e.to_string()))?);
    let fetcher: Arc<dyn RemoteFetchPort> = Arc::new(
        ReqwestFetcher::new(concat!("gemgate/", env!("CARGO_PKG_VERSION")))
            .map_err(|e| CliError::Config(e.to_string()))?,
    );
    let service = ChatService::new(generation, fetcher, args.service.resolver_config());

    let request = build_request(args);
    debug!(model = %request.model, files = request.files().len(), "Running ask");

    let response = service.generate_native(&request).await?;
    Ok(response.response)
}
