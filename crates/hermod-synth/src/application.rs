//! The Hermod application stack.
//!
//! Builds the inventory of tables, buckets, functions, API routes, schedules
//! and the CDN for one stage. Names and retention all derive from the stage
//! passed in.

use hermod_core::stack::{Environment, Resource, ResourceKind, StackManifest};
use hermod_core::{RemovalPolicy, Stage};
use std::collections::BTreeMap;
use tracing::debug;

/// Inputs for one application stack.
#[derive(Debug, Clone)]
pub struct ApplicationProps {
    /// Stack id (e.g. "dev-hermod", or "HermodStack" inside a pipeline stage).
    pub id: String,
    pub stage: Stage,
    pub environment: Option<Environment>,
}

pub fn description(stage: Stage) -> String {
    format!("Hermod ({}) - Predictive Multi-Modal Congestion Avoider", stage)
}

/// Tags applied to every application stack.
pub fn common_tags(stage: Stage) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Application".to_string(), "Hermod".to_string()),
        ("ManagedBy".to_string(), "hermod".to_string()),
        ("Stage".to_string(), stage.to_string()),
    ])
}

/// Build the application stack for a stage.
pub fn build(props: ApplicationProps) -> StackManifest {
    let stage = props.stage;
    let removal_policy = RemovalPolicy::for_stage(stage);

    let mut resources = Vec::new();
    resources.extend(tables(stage, removal_policy));
    resources.extend(buckets(stage, removal_policy));
    resources.extend(functions(stage));
    resources.extend(api(stage, removal_policy));
    resources.extend(schedules(stage));
    resources.extend(distribution(stage));

    debug!(
        stack = %props.id,
        stage = %stage,
        removal_policy = %removal_policy,
        resources = resources.len(),
        "built application stack"
    );

    StackManifest {
        id: props.id,
        description: description(stage),
        stage,
        environment: props.environment,
        removal_policy,
        tags: common_tags(stage),
        resources,
    }
}

const TABLES: &[(&str, &str)] = &[
    ("RoutesTable", "routes"),
    ("TransitDataTable", "transit-data"),
    ("WeatherDataTable", "weather-data"),
    ("UserPreferencesTable", "user-preferences"),
    ("PredictionsTable", "predictions"),
];

fn tables(stage: Stage, policy: RemovalPolicy) -> Vec<Resource> {
    TABLES
        .iter()
        .map(|(id, base)| {
            Resource::new(*id, ResourceKind::Table)
                .named(stage.resource_name(base))
                .durable(policy)
        })
        .collect()
}

const BUCKETS: &[(&str, &str)] = &[
    ("UIBucket", "ui-assets"),
    ("DataBucket", "data"),
    ("MLModelsBucket", "ml-models"),
];

fn buckets(stage: Stage, policy: RemovalPolicy) -> Vec<Resource> {
    BUCKETS
        .iter()
        .map(|(id, base)| {
            let resource = Resource::new(*id, ResourceKind::Bucket)
                .named(stage.resource_name(base))
                .durable(policy);
            if policy.auto_delete_objects() {
                resource.with_detail("auto-delete-objects")
            } else {
                resource
            }
        })
        .collect()
}

const FUNCTIONS: &[(&str, &str)] = &[
    ("FetchWeatherDataLambda", "fetch-weather-data"),
    ("FetchTransitDataLambda", "fetch-transit-data"),
    ("FetchBikeAvailabilityLambda", "fetch-bike-availability"),
    ("FetchFlexCarsharingLambda", "fetch-flex-carsharing"),
    ("ComputeRouteLambda", "compute-route"),
    ("GetPredictionLambda", "get-prediction"),
    ("GetUserPreferencesLambda", "get-user-preferences"),
    ("UpdateUserPreferencesLambda", "update-user-preferences"),
    ("GetMapOverlayLambda", "get-map-overlay"),
];

fn functions(stage: Stage) -> Vec<Resource> {
    FUNCTIONS
        .iter()
        .map(|(id, base)| Resource::new(*id, ResourceKind::Function).named(stage.resource_name(base)))
        .collect()
}

/// (method, path, integration target). `None` means a mock integration.
const ROUTES: &[(&str, &str, Option<&str>)] = &[
    ("POST", "/routes", Some("ComputeRouteLambda")),
    ("GET", "/routes/{routeId}", Some("ComputeRouteLambda")),
    ("GET", "/predictions", Some("GetPredictionLambda")),
    ("GET", "/predictions/{routeSegment}", Some("GetPredictionLambda")),
    ("GET", "/data/weather", Some("FetchWeatherDataLambda")),
    ("GET", "/data/transit", Some("FetchTransitDataLambda")),
    ("GET", "/data/bikes", Some("FetchBikeAvailabilityLambda")),
    ("GET", "/data/flex", Some("FetchFlexCarsharingLambda")),
    ("GET", "/map/overlay", Some("GetMapOverlayLambda")),
    ("GET", "/users/{userId}/preferences", Some("GetUserPreferencesLambda")),
    ("PUT", "/users/{userId}/preferences", Some("UpdateUserPreferencesLambda")),
    ("GET", "/health", None),
];

fn api(stage: Stage, policy: RemovalPolicy) -> Vec<Resource> {
    let api_name = stage.resource_name("api");

    let mut resources = vec![
        Resource::new("ApiAccessLogs", ResourceKind::LogGroup)
            .named(format!("/aws/apigateway/{}/access-logs", api_name))
            .durable(policy),
        Resource::new("HermodApi", ResourceKind::RestApi)
            .named(api_name)
            .with_detail("stage v1"),
    ];

    for (method, path, target) in ROUTES {
        let route = Resource::new(route_id(method, path), ResourceKind::ApiRoute)
            .with_detail(format!("{} {}", method, path));
        resources.push(match target {
            Some(function) => route.targeting(*function),
            None => route,
        });
    }

    resources
}

/// Construct id for a route, e.g. `GET /users/{userId}/preferences` -> `GetUsersUserIdPreferences`.
fn route_id(method: &str, path: &str) -> String {
    let mut id = capitalize(&method.to_lowercase());
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        let segment = segment.trim_start_matches('{').trim_end_matches('}');
        id.push_str(&capitalize(segment));
    }
    id
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// (rule id, name, minutes between runs, target function)
const SCHEDULES: &[(&str, &str, u32, &str)] = &[
    ("FetchWeatherSchedule", "fetch-weather-schedule", 15, "FetchWeatherDataLambda"),
    ("FetchTransitSchedule", "fetch-transit-schedule", 5, "FetchTransitDataLambda"),
    ("FetchBikeSchedule", "fetch-bike-schedule", 2, "FetchBikeAvailabilityLambda"),
    ("FetchFlexSchedule", "fetch-flex-schedule", 2, "FetchFlexCarsharingLambda"),
];

fn schedules(stage: Stage) -> Vec<Resource> {
    SCHEDULES
        .iter()
        .map(|(id, base, minutes, target)| {
            Resource::new(*id, ResourceKind::EventRule)
                .named(stage.resource_name(base))
                .targeting(*target)
                .with_detail(format!("rate({} minutes)", minutes))
        })
        .collect()
}

fn distribution(stage: Stage) -> Vec<Resource> {
    vec![
        Resource::new("StaticAssetsCachePolicy", ResourceKind::CachePolicy)
            .named(stage.resource_name("static-assets-cache")),
        Resource::new("HermodDistribution", ResourceKind::Distribution)
            .targeting("UIBucket")
            .with_detail("/api/* -> HermodApi"),
    ]
}
