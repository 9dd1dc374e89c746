// Resource endpoints
//
// Every resource shares the same list/create/update shape and differs
// only in its path and in how deletes are routed. The back office
// exposes two delete styles; each resource pins exactly one of them.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::LocapartClient;
use crate::error::Error;

/// How a resource accepts delete requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteRoute {
    /// `GET /{resource}/delete/{id}`
    GetDeletePath,
    /// `DELETE /{resource}/{id}`
    HttpDelete,
}

/// A REST resource mounted under the client's base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Path segment, e.g. `"appartement"`.
    pub path: &'static str,
    pub delete: DeleteRoute,
}

pub const APARTMENTS: Endpoint = Endpoint {
    path: "appartement",
    delete: DeleteRoute::GetDeletePath,
};

pub const CITIES: Endpoint = Endpoint {
    path: "ville",
    delete: DeleteRoute::GetDeletePath,
};

pub const RESERVATIONS: Endpoint = Endpoint {
    path: "reservation",
    delete: DeleteRoute::HttpDelete,
};

impl LocapartClient {
    /// List every record of a resource.
    ///
    /// `GET /{resource}`
    pub async fn list<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<Vec<T>, Error> {
        let url = self.resource_url(endpoint.path)?;
        debug!(resource = endpoint.path, "listing records");
        self.get_json(url).await
    }

    /// Create a record. The body must not carry an `id`.
    ///
    /// `POST /{resource}`. Returns the created record when the server echoes it.
    pub async fn create<T, B>(&self, endpoint: Endpoint, body: &B) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let url = self.resource_url(endpoint.path)?;
        debug!(resource = endpoint.path, "creating record");
        self.post(url, body).await
    }

    /// Replace a record. The body carries its `id`.
    ///
    /// `PUT /{resource}`
    pub async fn update<T, B>(&self, endpoint: Endpoint, body: &B) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let url = self.resource_url(endpoint.path)?;
        debug!(resource = endpoint.path, "updating record");
        self.put(url, body).await
    }

    /// Delete a record by id, using the resource's delete route.
    pub async fn delete_record(&self, endpoint: Endpoint, id: i64) -> Result<(), Error> {
        debug!(resource = endpoint.path, id, route = ?endpoint.delete, "deleting record");
        match endpoint.delete {
            DeleteRoute::GetDeletePath => {
                let url = self.resource_url(&format!("{}/delete/{id}", endpoint.path))?;
                self.get_command(url).await
            }
            DeleteRoute::HttpDelete => {
                let url = self.resource_url(&format!("{}/{id}", endpoint.path))?;
                self.delete(url).await
            }
        }
    }
}
