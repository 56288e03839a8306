use pretty_assertions::assert_eq;
use tinymvc::{AppContext, Config, RequestInfo};
use tinymvc_demo::services::UserService;

fn boot() -> AppContext {
    let config = Config::parse(&format!(
        "packageScan=tinymvc_demo\ntemplateRoot={}/templates\n",
        env!("CARGO_MANIFEST_DIR")
    ));
    AppContext::boot(config).expect("demo application boots")
}

#[test]
fn container_holds_controller_and_service() {
    let context = boot();
    let container = context.container();

    assert!(container.get("userController").is_some());
    assert!(container
        .resolve::<dyn UserService>("tinymvc_demo::services::UserService")
        .is_some());
}

#[test]
fn hello_renders_stored_user() {
    let context = boot();
    let response = context.dispatcher().dispatch(&RequestInfo::get("/web/hello.json"));

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.body(), "Alice/NYC");
}

#[test]
fn greet_binds_query_params() {
    let context = boot();
    let request = RequestInfo::get("/web/greet.json").with_query("name=Bob&age=30");
    let response = context.dispatcher().dispatch(&request);

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.body(), "hello Bob, age 30");
}

#[test]
fn greet_defaults_missing_params() {
    let context = boot();
    let response = context.dispatcher().dispatch(&RequestInfo::get("/web/greet.json"));

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.body(), "hello , age 0");
}

#[test]
fn greet_rejects_non_numeric_age() {
    let context = boot();
    let request = RequestInfo::get("/web/greet.json").with_query("name=Bob&age=old");
    let response = context.dispatcher().dispatch(&request);

    assert_eq!(response.status_code(), 500);
}

#[test]
fn post_form_params_bind_like_query_params() {
    let context = boot();
    let request = RequestInfo::post("/web/greet.json").with_params(vec![
        ("name".to_string(), "Carol".to_string()),
        ("age".to_string(), "41".to_string()),
    ]);
    let response = context.dispatcher().dispatch(&request);

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.body(), "hello Carol, age 41");
}

#[test]
fn unknown_path_is_not_found() {
    let context = boot();
    let response = context.dispatcher().dispatch(&RequestInfo::get("/nowhere"));

    assert_eq!(response.status_code(), 404);
    assert_eq!(response.body(), "404 Not Found");
}
