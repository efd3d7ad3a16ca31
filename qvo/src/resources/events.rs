//! Events: `events` and `events/{id}`.

use tracing::{info, instrument};

use super::validate_id;
use crate::{
    client::Client,
    error::Result,
    models::Event,
    params::Params,
    query::ListOptions,
    transport::{HttpMethod, Transport},
};

impl<T: Transport> Client<T> {
    /// Retrieves an event.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid id, or any executor error.
    #[instrument(skip(self))]
    pub async fn get_event(&self, event_id: &str) -> Result<Event> {
        let id = validate_id("event_id", event_id)?;
        info!("fetching event");
        self.fetch(HttpMethod::Get, &format!("events/{id}"), &Params::new()).await
    }

    /// Lists events.
    ///
    /// # Errors
    ///
    /// Returns any executor error.
    #[instrument(skip(self, options))]
    pub async fn list_events(&self, options: &ListOptions) -> Result<Vec<Event>> {
        info!("listing events");
        self.fetch(HttpMethod::Get, "events", &options.to_params()?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        query::Filter,
        testing::{EVENT_JSON, list_of, stub_client},
    };

    #[tokio::test]
    async fn test_get_event() {
        let (client, transport) = stub_client();
        transport.respond(200, EVENT_JSON);

        let event = client.get_event("evt_1").await.unwrap();
        assert_eq!(event.kind, "customer.created");
        assert_eq!(transport.last_request().url, "https://playground.qvo.cl/events/evt_1");
    }

    #[tokio::test]
    async fn test_list_events_by_type() {
        let (client, transport) = stub_client();
        transport.respond(200, &list_of(EVENT_JSON));

        let options = ListOptions::new().filter(Filter::new().equals("type", "customer.created"));
        let events = client.list_events(&options).await.unwrap();
        assert_eq!(events.len(), 1);

        let query = transport.last_query();
        assert_eq!(query, [("where".to_owned(), r#"{"type":{"=":"customer.created"}}"#.to_owned())]);
    }
}
