//! Generic CRUD service over the organization API.
//!
//! Each resource declares its collection path and payload types through the
//! [`Resource`] trait; one [`ResourceService`] implementation then covers all
//! five back-office collections.

use crate::api::client::OrgClient;
use crate::api::models::{
    Agent, CreateAgentRequest, CreateLeadGroupRequest, CreateRoutineRequest, CreateUserRequest,
    CreateVoiceAssetRequest, LeadGroup, ListEnvelope, Routine, UpdateAgentRequest,
    UpdateLeadGroupRequest, UpdateRoutineRequest, UpdateUserRequest, UpdateVoiceAssetRequest,
    User, VoiceAsset,
};
use crate::core::services::traits::{
    CreateService, DeleteService, GetService, ListParams, ListService, UpdateService,
};
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

/// A collection exposed by the organization API.
pub trait Resource: DeserializeOwned + Send + Sync + 'static {
    /// Collection segment under `/api/v1/`, e.g. `"agents"`.
    const PATH: &'static str;
    type Create: Serialize + Send + Sync + 'static;
    type Update: Serialize + Send + Sync + 'static;
}

impl Resource for Agent {
    const PATH: &'static str = "agents";
    type Create = CreateAgentRequest;
    type Update = UpdateAgentRequest;
}

impl Resource for Routine {
    const PATH: &'static str = "routines";
    type Create = CreateRoutineRequest;
    type Update = UpdateRoutineRequest;
}

impl Resource for User {
    const PATH: &'static str = "users";
    type Create = CreateUserRequest;
    type Update = UpdateUserRequest;
}

impl Resource for LeadGroup {
    const PATH: &'static str = "lead_groups";
    type Create = CreateLeadGroupRequest;
    type Update = UpdateLeadGroupRequest;
}

impl Resource for VoiceAsset {
    const PATH: &'static str = "voices";
    type Create = CreateVoiceAssetRequest;
    type Update = UpdateVoiceAssetRequest;
}

pub struct ResourceService<T> {
    client: OrgClient,
    _resource: PhantomData<T>,
}

impl<T: Resource> ResourceService<T> {
    pub fn new(client: OrgClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    fn collection_path() -> String {
        format!("/api/v1/{}", T::PATH)
    }

    fn item_path(id: u32) -> String {
        format!("/api/v1/{}/{}", T::PATH, id)
    }
}

#[async_trait]
impl<T: Resource> ListService<T> for ResourceService<T> {
    async fn list(&self, params: ListParams) -> Result<ListEnvelope<T>, AppError> {
        let path = Self::collection_path();
        let request = self
            .client
            .build_request(Method::GET, &path)
            .query(&params.to_query());
        let response = self.client.execute(request, &path).await?;
        Ok(self.client.handle_response(response, &path).await?)
    }
}

#[async_trait]
impl<T: Resource> GetService<T> for ResourceService<T> {
    async fn get(&self, id: u32) -> Result<T, AppError> {
        let path = Self::item_path(id);
        let request = self.client.build_request(Method::GET, &path);
        let response = self.client.execute(request, &path).await?;
        Ok(self.client.handle_response(response, &path).await?)
    }
}

#[async_trait]
impl<T: Resource> CreateService<T, T::Create> for ResourceService<T> {
    async fn create(&self, input: T::Create) -> Result<T, AppError> {
        let path = Self::collection_path();
        let request = self.client.build_request(Method::POST, &path).json(&input);
        let response = self.client.execute(request, &path).await?;
        Ok(self.client.handle_response(response, &path).await?)
    }
}

#[async_trait]
impl<T: Resource> UpdateService<T, T::Update> for ResourceService<T> {
    async fn update(&self, id: u32, input: T::Update) -> Result<T, AppError> {
        let path = Self::item_path(id);
        let request = self.client.build_request(Method::PATCH, &path).json(&input);
        let response = self.client.execute(request, &path).await?;
        Ok(self.client.handle_response(response, &path).await?)
    }
}

#[async_trait]
impl<T: Resource> DeleteService for ResourceService<T> {
    async fn delete(&self, id: u32) -> Result<(), AppError> {
        let path = Self::item_path(id);
        let request = self.client.build_request(Method::DELETE, &path);
        let response = self.client.execute(request, &path).await?;
        Ok(self.client.expect_success(response, &path).await?)
    }
}
