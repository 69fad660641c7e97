//! The join contract spoken over a channel.
//!
//! Implements [`RemoteJoinApi`] by framing each call as a [`NodeRequest`],
//! so the coordinator addresses a remote node through the exact same port as
//! its local service. A peer rejection comes back as the wire error code; a
//! dead link surfaces as a transport error.

use async_trait::async_trait;
use tracing::debug;

use bj_filter::FilterVector;
use shared_channel::LinkClient;
use shared_types::{JoinRow, Predicate};

use crate::error::ServiceError;
use crate::events::{NodeRequest, NodeResponse};
use crate::ports::{RemoteJoinApi, SessionId};

/// Client handle to a peer's join service.
#[derive(Clone)]
pub struct RemoteNodeClient {
    link: LinkClient,
}

impl RemoteNodeClient {
    /// Wrap the calling end of a link.
    pub fn new(link: LinkClient) -> Self {
        Self { link }
    }

    async fn call(&self, request: NodeRequest) -> Result<NodeResponse, ServiceError> {
        let response: NodeResponse = self.link.request(&request).await?;
        if let NodeResponse::Error { code, message } = response {
            debug!(code, %message, "Peer rejected request");
            return Err(ServiceError::PeerRejected { code, message });
        }
        Ok(response)
    }
}

#[async_trait]
impl RemoteJoinApi for RemoteNodeClient {
    async fn open_session(&self) -> Result<SessionId, ServiceError> {
        match self.call(NodeRequest::OpenSession).await? {
            NodeResponse::SessionOpened { session } => Ok(session),
            _ => Err(ServiceError::UnexpectedResponse),
        }
    }

    async fn configure_filter(
        &self,
        session: SessionId,
        slot_count: usize,
        hash_count: usize,
    ) -> Result<(), ServiceError> {
        let request = NodeRequest::ConfigureFilter {
            session,
            slot_count: slot_count as u64,
            hash_count: hash_count as u64,
        };
        match self.call(request).await? {
            NodeResponse::Ack => Ok(()),
            _ => Err(ServiceError::UnexpectedResponse),
        }
    }

    async fn bind_hash_functions(
        &self,
        session: SessionId,
        coefficients: Vec<(u64, u64)>,
    ) -> Result<(), ServiceError> {
        let request = NodeRequest::BindHashFunctions {
            session,
            coefficients,
        };
        match self.call(request).await? {
            NodeResponse::Ack => Ok(()),
            _ => Err(ServiceError::UnexpectedResponse),
        }
    }

    async fn populate_from_predicate(
        &self,
        session: SessionId,
        predicate: Predicate,
    ) -> Result<usize, ServiceError> {
        let request = NodeRequest::PopulateFromPredicate { session, predicate };
        match self.call(request).await? {
            NodeResponse::MatchedCount { count } => Ok(count as usize),
            _ => Err(ServiceError::UnexpectedResponse),
        }
    }

    async fn export_filter_vector(
        &self,
        session: SessionId,
    ) -> Result<FilterVector, ServiceError> {
        match self.call(NodeRequest::ExportFilterVector { session }).await? {
            NodeResponse::FilterVector { vector } => Ok(vector),
            _ => Err(ServiceError::UnexpectedResponse),
        }
    }

    async fn resolve_by_vector(
        &self,
        session: SessionId,
        vector: FilterVector,
    ) -> Result<Vec<JoinRow>, ServiceError> {
        let request = NodeRequest::ResolveByVector { session, vector };
        match self.call(request).await? {
            NodeResponse::Rows { rows } => Ok(rows),
            _ => Err(ServiceError::UnexpectedResponse),
        }
    }

    async fn query_by_predicate(
        &self,
        predicate: Predicate,
    ) -> Result<Vec<JoinRow>, ServiceError> {
        match self.call(NodeRequest::QueryByPredicate { predicate }).await? {
            NodeResponse::Rows { rows } => Ok(rows),
            _ => Err(ServiceError::UnexpectedResponse),
        }
    }

    async fn close_session(&self, session: SessionId) -> Result<(), ServiceError> {
        match self.call(NodeRequest::CloseSession { session }).await? {
            NodeResponse::Ack => Ok(()),
            _ => Err(ServiceError::UnexpectedResponse),
        }
    }
}
