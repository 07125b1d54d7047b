use crate::api;
use crate::domain::{Customer, CustomerDto};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Customer Management API", version = "v1"),
    paths(
        api::health::health_check,
        api::customers::get_customer_by_id,
        api::customers::add_customer,
        api::customers::update_customer,
        api::customers::delete_customer,
        api::customers::get_customers,
    ),
    components(schemas(Customer, CustomerDto)),
    tags(
        (name = "customers", description = "Customer management"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
