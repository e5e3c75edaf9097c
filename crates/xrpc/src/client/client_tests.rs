#![allow(non_snake_case)]

use super::*;
use crate::transport::Response;
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Clone, PartialEq, prost::Message)]
struct Echo {
    #[prost(string, tag = "1")]
    text: String,
}

/// Doer that records requests and answers with a canned response
struct RecordingDoer {
    requests: Mutex<Vec<Request>>,
    response: Response,
}

impl RecordingDoer {
    fn answering(response: Response) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            response,
        })
    }

    fn last_request(&self) -> Request {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl Doer for RecordingDoer {
    async fn execute(&self, request: Request) -> Result<Response> {
        self.requests.lock().unwrap().push(request);
        Ok(self.response.clone())
    }
}

fn echo_client(doer: Arc<RecordingDoer>, opts: &[CallOption]) -> Client {
    Client::new(
        doer,
        "http://localhost/acme.echo.v1.EchoService/Echo",
        "acme.echo.v1.EchoService.Echo",
        "acme.echo.v1.EchoService",
        "acme.echo.v1",
        opts,
    )
}

#[tokio::test]
async fn Client___call___sends_encoded_request_to_url() {
    let reply = Echo {
        text: "pong".into(),
    };
    let doer = RecordingDoer::answering(Response::ok(prost::Message::encode_to_vec(&reply)));
    let client = echo_client(doer.clone(), &[]);
    let mut res = Echo::default();

    client
        .call(
            Context::background(),
            &Echo {
                text: "ping".into(),
            },
            &mut res,
            &[],
        )
        .await
        .unwrap();

    let request = doer.last_request();
    assert_eq!(request.url, "http://localhost/acme.echo.v1.EchoService/Echo");
    assert_eq!(
        <Echo as prost::Message>::decode(request.body.as_slice()).unwrap().text,
        "ping"
    );
    assert_eq!(res, reply);
}

#[tokio::test]
async fn Client___call___propagates_error_unchanged() {
    let err = Error::new(Code::NotFound, "no such greeting");
    let doer = RecordingDoer::answering(Response::from_error(&err));
    let client = echo_client(doer, &[]);
    let mut res = Echo::default();

    let result = client
        .call(Context::background(), &Echo::default(), &mut res, &[])
        .await;

    assert_eq!(result.unwrap_err(), err);
}

#[tokio::test]
async fn Client___call___merges_context_and_option_headers() {
    let doer = RecordingDoer::answering(Response::ok(Vec::new()));
    let client = echo_client(doer.clone(), &[CallOption::header("x-client", "a")]);
    let ctx = Context::background().with_header("x-trace", "t1");
    let mut res = Echo::default();

    client
        .call(
            ctx,
            &Echo::default(),
            &mut res,
            &[CallOption::header("x-call", "b")],
        )
        .await
        .unwrap();

    let headers = doer.last_request().headers;
    assert_eq!(headers.get("x-client").map(String::as_str), Some("a"));
    assert_eq!(headers.get("x-call").map(String::as_str), Some("b"));
    assert_eq!(headers.get("x-trace").map(String::as_str), Some("t1"));
}

#[tokio::test]
async fn Client___call___enforces_max_response_bytes() {
    let reply = Echo {
        text: "a fairly long reply".into(),
    };
    let doer = RecordingDoer::answering(Response::ok(prost::Message::encode_to_vec(&reply)));
    let client = echo_client(doer, &[]);
    let mut res = Echo::default();

    let err = client
        .call(
            Context::background(),
            &Echo::default(),
            &mut res,
            &[CallOption::MaxResponseBytes(4)],
        )
        .await
        .unwrap_err();

    assert_eq!(err.code(), Code::ResourceExhausted);
}

#[tokio::test]
async fn Client___call___undecodable_response_is_internal() {
    let doer = RecordingDoer::answering(Response::ok(vec![0xff]));
    let client = echo_client(doer, &[]);
    let mut res = Echo::default();

    let err = client
        .call(Context::background(), &Echo::default(), &mut res, &[])
        .await
        .unwrap_err();

    assert_eq!(err.code(), Code::Internal);
    assert!(err.message().contains("acme.echo.v1.EchoService.Echo"));
}

#[test]
fn Client___accessors___return_identifying_names() {
    let client = echo_client(RecordingDoer::answering(Response::default()), &[]);

    assert_eq!(client.procedure(), "acme.echo.v1.EchoService.Echo");
    assert_eq!(client.service(), "acme.echo.v1.EchoService");
    assert_eq!(client.package(), "acme.echo.v1");
}
