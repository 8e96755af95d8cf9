use std::net::SocketAddr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;

use lodestar_core::{Error, ModuleAddress, ModuleRegistry, RegistryConfig};
use lodestar_fabric::transport::TcpConductor;
use lodestar_fabric::wire::{read_frame, write_frame, CallEnvelope, CallOutcome};
use lodestar_fabric::{Dispatcher, Endpoint};

#[derive(Debug, Serialize)]
struct GreetParams {
    name: String,
}

#[derive(Debug, Deserialize)]
struct GreetReply {
    greeting: String,
}

fn agent_module() -> ModuleAddress {
    ModuleAddress::from_bytes(&[7u8; ModuleAddress::LEN]).unwrap()
}

fn registry() -> Arc<ModuleRegistry> {
    let config = RegistryConfig {
        capabilities: [("agent".to_string(), vec![agent_module().to_string()])]
            .into_iter()
            .collect(),
    };
    Arc::new(ModuleRegistry::from_config(config, &["agent"]).unwrap())
}

/// Spawn a stub conductor that answers every call with `respond(envelope)`.
async fn stub_conductor<F>(respond: F) -> SocketAddr
where
    F: Fn(&CallEnvelope) -> CallOutcome + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            let frame = read_frame(&mut stream).await.unwrap();
            let envelope = CallEnvelope::from_bytes(&frame).unwrap();
            let outcome = respond(&envelope);
            write_frame(&mut stream, &outcome.to_bytes().unwrap())
                .await
                .unwrap();
        }
    });
    addr
}

fn dispatcher(addr: SocketAddr) -> Dispatcher {
    Dispatcher::new(
        Endpoint::from(addr),
        registry(),
        Arc::new(TcpConductor::new()),
    )
}

#[tokio::test]
async fn bound_call_roundtrips_through_stub_conductor() {
    let addr = stub_conductor(|envelope| {
        assert_eq!(envelope.capability, "agent");
        assert_eq!(envelope.function, "greet");
        assert_eq!(envelope.module, agent_module().as_bytes());
        let params: serde_json::Value = serde_json::from_slice(&envelope.payload).unwrap();
        let reply = json!({ "greeting": format!("hello {}", params["name"].as_str().unwrap()) });
        CallOutcome::Success(serde_json::to_vec(&reply).unwrap())
    })
    .await;

    let call = dispatcher(addr)
        .bind::<GreetParams, GreetReply>("agent", "greet")
        .unwrap();
    let rendered = format!("{call:?}");
    assert!(rendered.contains("agent") && rendered.contains("greet"));

    let reply = call
        .invoke(&GreetParams {
            name: "alice".into(),
        })
        .await
        .unwrap();
    assert_eq!(reply.greeting, "hello alice");
}

#[tokio::test]
async fn remote_failure_surfaces_verbatim() {
    let addr =
        stub_conductor(|_| CallOutcome::Failure("no such record".to_string())).await;

    let call = dispatcher(addr)
        .bind::<GreetParams, GreetReply>("agent", "greet")
        .unwrap();
    let err = call
        .invoke(&GreetParams { name: "bob".into() })
        .await
        .unwrap_err();
    match err {
        Error::Remote(reason) => assert_eq!(reason, "no such record"),
        other => panic!("expected Remote, got {other}"),
    }
}

#[tokio::test]
async fn shape_mismatch_is_serialization_error() {
    let addr = stub_conductor(|_| {
        CallOutcome::Success(serde_json::to_vec(&json!({ "unexpected": true })).unwrap())
    })
    .await;

    let call = dispatcher(addr)
        .bind::<GreetParams, GreetReply>("agent", "greet")
        .unwrap();
    let err = call
        .invoke(&GreetParams { name: "bob".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    // Bind-then-drop guarantees nothing is listening on the port.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let call = dispatcher(addr)
        .bind::<GreetParams, GreetReply>("agent", "greet")
        .unwrap();
    let err = call
        .invoke(&GreetParams { name: "bob".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn binding_unknown_capability_fails_without_network() {
    let addr: SocketAddr = "127.0.0.1:1".parse().unwrap();
    let err = dispatcher(addr)
        .bind::<GreetParams, GreetReply>("observation", "greet")
        .unwrap_err();
    assert!(matches!(err, Error::UnknownCapability(_)));
}

#[tokio::test]
async fn concurrent_invocations_do_not_interfere() {
    let addr = stub_conductor(|envelope| {
        let params: serde_json::Value = serde_json::from_slice(&envelope.payload).unwrap();
        let name = params["name"].as_str().unwrap();
        let reply = json!({ "greeting": format!("hello {name}") });
        CallOutcome::Success(serde_json::to_vec(&reply).unwrap())
    })
    .await;

    let call = Arc::new(
        dispatcher(addr)
            .bind::<GreetParams, GreetReply>("agent", "greet")
            .unwrap(),
    );

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..32 {
        let call = Arc::clone(&call);
        tasks.spawn(async move {
            let reply = call
                .invoke(&GreetParams {
                    name: format!("agent-{i}"),
                })
                .await
                .unwrap();
            (i, reply.greeting)
        });
    }
    while let Some(result) = tasks.join_next().await {
        let (i, greeting) = result.unwrap();
        assert_eq!(greeting, format!("hello agent-{i}"));
    }
}
