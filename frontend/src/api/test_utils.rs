use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use serde_json::Value;

use super::{ApiError, RawRequest, RawResponse, Transport};

/// Replays canned responses in order and records every request it was given.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeTransport {
    responses: Rc<RefCell<VecDeque<Result<RawResponse, ApiError>>>>,
    requests: Rc<RefCell<Vec<RawRequest>>>,
}

impl FakeTransport {
    pub(crate) fn with_responses(responses: impl IntoIterator<Item = RawResponse>) -> Self {
        Self {
            responses: Rc::new(RefCell::new(responses.into_iter().map(Ok).collect())),
            requests: Rc::default(),
        }
    }

    /// Every request fails as if the network were down.
    pub(crate) fn failing(reason: &str) -> Self {
        Self {
            responses: Rc::new(RefCell::new(VecDeque::from([Err(ApiError::Network(
                reason.to_owned(),
            ))]))),
            requests: Rc::default(),
        }
    }

    pub(crate) fn requests(&self) -> Vec<RawRequest> {
        self.requests.borrow().clone()
    }

    #[track_caller]
    pub(crate) fn last_request(&self) -> RawRequest {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: RawRequest) -> Result<RawResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .expect("no canned response left")
    }
}

pub(crate) fn json_response(status: u16, body: Value) -> RawResponse {
    RawResponse {
        status,
        content_type: Some("application/json".to_owned()),
        body: Some(body.to_string()),
    }
}

pub(crate) fn text_response(status: u16, body: &str) -> RawResponse {
    RawResponse {
        status,
        content_type: Some("text/plain;charset=UTF-8".to_owned()),
        body: Some(body.to_owned()),
    }
}
