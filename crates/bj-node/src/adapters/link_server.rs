//! Serve loop: frames in, service calls, frames out.
//!
//! Owns the listening end of a link and dispatches each decoded request to
//! the node's service. Spawned as a background task by whoever wires the
//! node; the loop ends when every client handle is dropped.

use std::sync::Arc;

use tracing::{error, info, warn};

use shared_channel::{decode_frame, encode_frame, LinkListener};

use crate::events::{error_codes, NodeRequest, NodeResponse};
use crate::ports::{RelationStore, RemoteJoinApi};
use crate::service::JoinService;

/// A node's serving side of the channel.
pub struct LinkServer<S: RelationStore> {
    service: Arc<JoinService<S>>,
    listener: LinkListener,
}

impl<S: RelationStore + 'static> LinkServer<S> {
    /// Attach a service to the listening end of a link.
    pub fn new(service: Arc<JoinService<S>>, listener: LinkListener) -> Self {
        Self { service, listener }
    }

    /// Serve until the link closes.
    pub async fn run(mut self) {
        info!("Join node serving requests");
        while let Some(incoming) = self.listener.next_request().await {
            let response = match decode_frame::<NodeRequest>(incoming.frame()) {
                Ok(request) => self.dispatch(request).await,
                Err(e) => {
                    warn!(error = %e, "Undecodable request frame");
                    NodeResponse::Error {
                        code: error_codes::MALFORMED_FRAME,
                        message: e.to_string(),
                    }
                }
            };
            match encode_frame(&response) {
                Ok(frame) => incoming.respond(frame),
                Err(e) => error!(error = %e, "Response frame could not be encoded"),
            }
        }
        info!("Link closed, join node serve loop ending");
    }

    async fn dispatch(&self, request: NodeRequest) -> NodeResponse {
        match request {
            NodeRequest::OpenSession => match self.service.open_session().await {
                Ok(session) => NodeResponse::SessionOpened { session },
                Err(e) => NodeResponse::from_error(&e),
            },
            NodeRequest::ConfigureFilter {
                session,
                slot_count,
                hash_count,
            } => {
                let result = self
                    .service
                    .configure_filter(session, slot_count as usize, hash_count as usize)
                    .await;
                match result {
                    Ok(()) => NodeResponse::Ack,
                    Err(e) => NodeResponse::from_error(&e),
                }
            }
            NodeRequest::BindHashFunctions {
                session,
                coefficients,
            } => match self.service.bind_hash_functions(session, coefficients).await {
                Ok(()) => NodeResponse::Ack,
                Err(e) => NodeResponse::from_error(&e),
            },
            NodeRequest::PopulateFromPredicate { session, predicate } => {
                match self.service.populate_from_predicate(session, predicate).await {
                    Ok(count) => NodeResponse::MatchedCount {
                        count: count as u64,
                    },
                    Err(e) => NodeResponse::from_error(&e),
                }
            }
            NodeRequest::ExportFilterVector { session } => {
                match self.service.export_filter_vector(session).await {
                    Ok(vector) => NodeResponse::FilterVector { vector },
                    Err(e) => NodeResponse::from_error(&e),
                }
            }
            NodeRequest::ResolveByVector { session, vector } => {
                match self.service.resolve_by_vector(session, vector).await {
                    Ok(rows) => NodeResponse::Rows { rows },
                    Err(e) => NodeResponse::from_error(&e),
                }
            }
            NodeRequest::QueryByPredicate { predicate } => {
                match self.service.query_by_predicate(predicate).await {
                    Ok(rows) => NodeResponse::Rows { rows },
                    Err(e) => NodeResponse::from_error(&e),
                }
            }
            NodeRequest::CloseSession { session } => {
                match self.service.close_session(session).await {
                    Ok(()) => NodeResponse::Ack,
                    Err(e) => NodeResponse::from_error(&e),
                }
            }
        }
    }
}
