use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
    IdPath, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;

const TAG: &str = "products";

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        get_product_by_name,
        list_products_by_category,
        list_low_stock_products,
        list_out_of_stock_products,
        in_stock_count,
        total_inventory,
    ),
    components(
        schemas(Product, CreateProduct, UpdateProduct),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Inventory product management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the product router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/name/{name}", get(get_product_by_name))
        .route("/category/{category}", get(list_products_by_category))
        .route("/low-stock/{threshold}", get(list_low_stock_products))
        .route("/out-of-stock", get(list_out_of_stock_products))
        .route("/stats/in-stock-count", get(in_stock_count))
        .route("/stats/total-inventory", get(total_inventory))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "List of all products", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Update a product (full replacement)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<impl IntoResponse> {
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get a product by its exact name
#[utoipa::path(
    get,
    path = "/name/{name}",
    tag = TAG,
    params(
        ("name" = String, Path, description = "Exact product name")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product_by_name<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(name): Path<String>,
) -> ProductResult<Json<Product>> {
    let product = service.get_product_by_name(&name).await?;
    Ok(Json(product))
}

/// List products in a category
#[utoipa::path(
    get,
    path = "/category/{category}",
    tag = TAG,
    params(
        ("category" = String, Path, description = "Category name")
    ),
    responses(
        (status = 200, description = "Products in the category (possibly empty)", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products_by_category<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(category): Path<String>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products_by_category(&category).await?;
    Ok(Json(products))
}

/// List products with stock below a threshold
#[utoipa::path(
    get,
    path = "/low-stock/{threshold}",
    tag = TAG,
    params(
        ("threshold" = i32, Path, description = "Exclusive quantity threshold")
    ),
    responses(
        (status = 200, description = "Products with quantity strictly below the threshold", body = Vec<Product>),
        (status = 400, description = "Threshold is not a valid integer"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_low_stock_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(threshold): Path<i32>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_low_stock_products(threshold).await?;
    Ok(Json(products))
}

/// List out-of-stock products
#[utoipa::path(
    get,
    path = "/out-of-stock",
    tag = TAG,
    responses(
        (status = 200, description = "Products with zero quantity", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_out_of_stock_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_out_of_stock_products().await?;
    Ok(Json(products))
}

/// Number of products with at least one unit on hand
#[utoipa::path(
    get,
    path = "/stats/in-stock-count",
    tag = TAG,
    responses(
        (status = 200, description = "Count of in-stock products", body = i64),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn in_stock_count<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<i64>> {
    let count = service.in_stock_count().await?;
    Ok(Json(count))
}

/// Total units on hand across all products
#[utoipa::path(
    get,
    path = "/stats/total-inventory",
    tag = TAG,
    responses(
        (status = 200, description = "Sum of all quantities", body = i64),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn total_inventory<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<i64>> {
    let total = service.total_inventory().await?;
    Ok(Json(total))
}
