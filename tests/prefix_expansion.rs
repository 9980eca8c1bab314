use axum::http::Method;
use multiprefix::prelude::*;
use multiprefix::route::RouteTemplate;
use multiprefix::{Route, collect_prefixes, expand_routes};
use std::sync::Mutex;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Records every prefix it is asked to build a route for
#[derive(Default)]
struct RecordingFactory {
    seen: Mutex<Vec<Option<String>>>,
}

impl DirectRouteFactory for RecordingFactory {
    fn create_route(&self, context: &DirectRouteFactoryContext<'_>) -> Result<Option<RouteEntry>> {
        self.seen
            .lock()
            .unwrap()
            .push(context.prefix.map(str::to_string));
        let route = context.build_route("{id}")?;
        Ok(Some(RouteEntry::new(None, route)))
    }
}

/// Builds a route with a custom handler, which the provider must reject
struct HandlerFactory;

impl DirectRouteFactory for HandlerFactory {
    fn create_route(&self, context: &DirectRouteFactoryContext<'_>) -> Result<Option<RouteEntry>> {
        let route = Route::new(RouteTemplate::parse(context.prefix.unwrap_or_default())?)
            .with_handler(axum::routing::get(|| async { "custom" }));
        Ok(Some(RouteEntry::new(None, route)))
    }
}

fn orders_controller(prefixes: &[&str]) -> Arc<ControllerDescriptor> {
    let descriptor = prefixes.iter().fold(
        ControllerDescriptor::new("shop::api::OrdersController"),
        |d, p| d.prefix(RoutePrefix::new(*p)),
    );
    Arc::new(descriptor)
}

#[test]
fn two_prefixes_feed_exact_values_in_order() {
    init_tracing();
    let controller = orders_controller(&["v1/orders", "v2/orders"]);
    let action = Arc::new(ActionDescriptor::new(controller.clone(), "get", Method::GET));
    let recording = Arc::new(RecordingFactory::default());
    let factories: Vec<Arc<dyn DirectRouteFactory>> = vec![recording.clone()];

    let entries = MultiplePrefixDirectRouteProvider::default()
        .action_direct_routes(&action, &factories, &DefaultInlineConstraintResolver)
        .unwrap();

    assert_eq!(
        *recording.seen.lock().unwrap(),
        vec![Some("v1/orders".to_string()), Some("v2/orders".to_string())]
    );
    let templates: Vec<_> = entries.iter().map(|e| e.template()).collect();
    assert_eq!(templates, vec!["v1/orders/{id}", "v2/orders/{id}"]);
}

#[test]
fn trailing_slash_fails_startup_with_no_routes() {
    init_tracing();
    let controller = orders_controller(&["orders/"]);
    let result = RouteTable::builder()
        .controller(
            controller.clone(),
            [ActionDescriptor::new(controller, "get", Method::GET).route("{id}")],
        )
        .build();

    let err = result.unwrap_err();
    assert!(matches!(err, RoutingError::InvalidPrefix { .. }));
    assert!(!err.is_null_result());
    let message = err.to_string();
    assert!(message.contains("orders/"), "{message}");
    assert!(message.contains("Orders"), "{message}");
}

#[test]
fn no_prefix_gives_unprefixed_routes_at_both_call_sites() {
    init_tracing();
    let controller = orders_controller(&[]);
    assert_eq!(
        collect_prefixes(&controller, &RoutingConfig::default()).unwrap(),
        vec![None]
    );

    let recording = Arc::new(RecordingFactory::default());
    let factories: Vec<Arc<dyn DirectRouteFactory>> = vec![recording.clone()];
    let action = Arc::new(ActionDescriptor::new(controller.clone(), "get", Method::GET));
    let provider = MultiplePrefixDirectRouteProvider::default();

    let action_routes = provider
        .action_direct_routes(&action, &factories, &DefaultInlineConstraintResolver)
        .unwrap();
    let controller_routes = provider
        .controller_direct_routes(
            &controller,
            &[action],
            &factories,
            &DefaultInlineConstraintResolver,
        )
        .unwrap();

    assert_eq!(*recording.seen.lock().unwrap(), vec![None, None]);
    assert_eq!(action_routes[0].template(), "{id}");
    assert_eq!(controller_routes[0].template(), "{id}");
}

#[test]
fn expansion_yields_prefixes_times_factories() {
    let prefixes: Vec<Option<String>> = (1..=3).map(|v| Some(format!("v{v}"))).collect();
    let factories: Vec<Arc<dyn DirectRouteFactory>> = ["a", "b"]
        .into_iter()
        .map(|t| Arc::new(RouteTemplateFactory::new(t)) as Arc<dyn DirectRouteFactory>)
        .collect();

    let entries = expand_routes(
        &prefixes,
        &factories,
        &[],
        &DefaultInlineConstraintResolver,
        false,
    )
    .unwrap();

    assert_eq!(entries.len(), 6);
    let templates: Vec<_> = entries.iter().map(|e| e.template()).collect();
    assert_eq!(templates, vec!["v1/a", "v1/b", "v2/a", "v2/b", "v3/a", "v3/b"]);
}

#[test]
fn handler_route_fails_the_whole_controller() {
    init_tracing();
    let controller = orders_controller(&["v1/orders", "v2/orders"]);
    let result = RouteTable::builder()
        .controller(
            controller.clone(),
            [
                ActionDescriptor::new(controller.clone(), "list", Method::GET).route(""),
                ActionDescriptor::new(controller, "special", Method::GET)
                    .factory(Arc::new(HandlerFactory)),
            ],
        )
        .build();

    assert!(matches!(
        result,
        Err(RoutingError::HandlerNotSupported { ref template }) if template == "v1/orders"
    ));
}

#[test]
fn inherited_prefixes_come_before_own() {
    let base = ControllerDescriptor::new("shop::api::ApiController").prefix(RoutePrefix::new("api"));
    let controller = ControllerDescriptor::new("shop::api::OrdersController")
        .prefix(RoutePrefix::with_order("orders", 2))
        .inherit(&base);

    let prefixes = collect_prefixes(&controller, &RoutingConfig::default()).unwrap();
    assert_eq!(
        prefixes,
        vec![Some("api".to_string()), Some("orders".to_string())]
    );
    assert_eq!(controller.route_prefixes()[1].order(), 2);
}

#[test]
fn empty_prefix_is_configurable() {
    let config = ConfigService::empty();
    config.set("MULTIPREFIX_REJECT_EMPTY_PREFIXES", "true");
    let strict = RoutingConfig::from_config(&config).unwrap();

    let controller = orders_controller(&[""]);
    let build = |config: RoutingConfig| {
        RouteTable::builder()
            .config(config)
            .controller(
                controller.clone(),
                [ActionDescriptor::new(controller.clone(), "get", Method::GET).route("{id}")],
            )
            .build()
    };

    let table = build(RoutingConfig::default()).unwrap();
    assert_eq!(table.templates(), vec!["{id}"]);
    assert!(matches!(build(strict), Err(RoutingError::EmptyPrefix { .. })));
}
