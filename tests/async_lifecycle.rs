mod common;

use common::{setup, RecordingDispatcher};
use reducegen::{
    Action, ActionFactory, Dispatch, DispatchError, MemberAccessor, TransitionRegistry,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

fn cars_merge(cars: &Value, _state: &Value) -> Value {
    json!({ "cars": cars })
}

fn factory() -> ActionFactory {
    ActionFactory::new(Arc::new(TransitionRegistry::new()))
}

#[tokio::test]
async fn success_dispatches_in_order() {
    let lifecycle = factory().async_update("cars", cars_merge, |_q: Value| async {
        Ok::<_, Value>(json!([1, 2, 3]))
    });
    let recorder = RecordingDispatcher::new();
    lifecycle.run(Value::Null, &recorder).await;

    assert_eq!(
        recorder.log(),
        vec![
            "SET_CARS_LOADING:true",
            "SET_CARS_ERROR:false",
            "SET_CARS_LOADING:false",
            "UPDATE_CARS:[1,2,3]",
        ]
    );
}

#[tokio::test]
async fn failure_sets_error_and_stops() {
    let lifecycle = factory().async_update("cars", cars_merge, |_q: Value| async {
        Err::<Value, _>(json!("boom"))
    });
    let recorder = RecordingDispatcher::new();
    lifecycle.run(Value::Null, &recorder).await;

    assert_eq!(
        recorder.log(),
        vec![
            "SET_CARS_LOADING:true",
            "SET_CARS_ERROR:false",
            "SET_CARS_ERROR:\"boom\"",
        ]
    );
}

#[tokio::test]
async fn query_reaches_operation() {
    let lifecycle = factory().async_set("dropoff", |q: Value| async move {
        Ok::<_, Value>(json!(format!("{}_test", q.as_str().unwrap_or_default())))
    });
    let recorder = RecordingDispatcher::new();
    lifecycle.run(json!("test"), &recorder).await;

    let last = recorder.actions().pop().unwrap();
    assert_eq!(last.action_type, "SET_DROPOFF");
    assert_eq!(last.payload, json!("test_test"));
}

#[tokio::test]
async fn accessor_extracts_member_when_present() {
    let lifecycle = factory()
        .async_update("cars", cars_merge, |_q: Value| async {
            Ok::<_, Value>(json!({"status": 200, "body": ["a"]}))
        })
        .with_accessor(MemberAccessor::new("body"));
    let recorder = RecordingDispatcher::new();
    lifecycle.run(Value::Null, &recorder).await;
    assert_eq!(recorder.log().last().unwrap(), "UPDATE_CARS:[\"a\"]");
}

#[tokio::test]
async fn accessor_skipped_when_not_applicable() {
    let lifecycle = factory()
        .async_update("cars", cars_merge, |_q: Value| async {
            Ok::<_, Value>(json!([1]))
        })
        .with_accessor(MemberAccessor::new("body"));
    let recorder = RecordingDispatcher::new();
    lifecycle.run(Value::Null, &recorder).await;
    assert_eq!(recorder.log().last().unwrap(), "UPDATE_CARS:[1]");
}

#[tokio::test]
async fn store_reflects_lifecycle_flags() {
    let (_, factory, store) = setup(json!({}));
    let lifecycle = factory.async_update("cars", cars_merge, |_q: Value| async {
        Ok::<_, Value>(json!([1, 2, 3]))
    });
    lifecycle.run(Value::Null, &store).await;
    assert_eq!(
        store.state(),
        json!({"cars_loading": false, "cars_error": false, "cars": [1, 2, 3]})
    );

    let failing = factory.async_update("cars", cars_merge, |_q: Value| async {
        Err::<Value, _>(json!("offline"))
    });
    failing.run(Value::Null, &store).await;
    assert_eq!(
        store.state(),
        json!({"cars_loading": true, "cars_error": "offline", "cars": [1, 2, 3]})
    );
}

#[tokio::test]
async fn repeated_runs_register_once() {
    let (registry, factory, store) = setup(json!({}));
    let lifecycle = factory.async_set("dropoff", |q: Value| async move { Ok::<_, Value>(q) });
    lifecycle.run(json!("a"), &store).await;
    let after_first = registry.len();
    lifecycle.run(json!("b"), &store).await;
    assert_eq!(registry.len(), after_first);
    // init x2, loading, error, value
    assert_eq!(after_first, 5);
    assert_eq!(store.state()["dropoff"], json!("b"));
}

#[tokio::test]
async fn concurrent_lifecycles_share_registry() {
    let (registry, factory, store) = setup(json!({}));
    let slow = factory.async_set("slow", |_q: Value| async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        Ok::<_, Value>(json!("slow"))
    });
    let fast = factory.async_set("fast", |_q: Value| async { Ok::<_, Value>(json!("fast")) });

    let store_a = store.clone();
    let store_b = store.clone();
    let a = tokio::spawn(async move { slow.run(Value::Null, &store_a).await });
    let b = tokio::spawn(async move { fast.run(Value::Null, &store_b).await });
    a.await.unwrap();
    b.await.unwrap();

    let state = store.state();
    assert_eq!(state["slow"], json!("slow"));
    assert_eq!(state["fast"], json!("fast"));
    assert_eq!(state["slow_loading"], json!(false));
    assert_eq!(state["fast_loading"], json!(false));
    assert_eq!(registry.len(), 2 + 3 + 3);
}

#[tokio::test]
async fn failed_result_dispatch_sets_error_flag() {
    let (_, factory, store) = setup(json!({}));
    let lifecycle = factory.async_update(
        "cars",
        |data: &Value, _: &Value| data.clone(),
        |_q: Value| async { Ok::<_, Value>(json!([1, 2, 3])) },
    );
    lifecycle.run(Value::Null, &store).await;

    let state = store.state();
    assert_eq!(state["cars_loading"], json!(false));
    assert_eq!(
        state["cars_error"],
        json!("Merge 'UPDATE_CARS' returned a non-object value: array")
    );
    assert!(state.get("cars").is_none());
}

#[tokio::test]
async fn failed_result_dispatch_is_recorded_after_outcome() {
    struct RejectingOutcome {
        inner: RecordingDispatcher,
    }

    impl Dispatch for RejectingOutcome {
        fn dispatch(&self, action: Action) -> Result<(), DispatchError> {
            let rejected = action.action_type == "UPDATE_CARS";
            self.inner.dispatch(action)?;
            if rejected {
                return Err(DispatchError::ReducerNotFound {
                    action_type: "UPDATE_CARS".to_string(),
                });
            }
            Ok(())
        }
    }

    let lifecycle = factory().async_update("cars", cars_merge, |_q: Value| async {
        Ok::<_, Value>(json!([1]))
    });
    let dispatcher = RejectingOutcome {
        inner: RecordingDispatcher::new(),
    };
    lifecycle.run(Value::Null, &dispatcher).await;

    assert_eq!(
        dispatcher.inner.log(),
        vec![
            "SET_CARS_LOADING:true",
            "SET_CARS_ERROR:false",
            "SET_CARS_LOADING:false",
            "UPDATE_CARS:[1]",
            "SET_CARS_ERROR:\"Reducer not found for action 'UPDATE_CARS'\"",
        ]
    );
}
