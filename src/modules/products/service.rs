use tracing::{debug, error, info, instrument};

use crate::modules::products::model::{CreateProductDto, Product, UpdateProductDto};
use crate::supabase::{SupabaseClient, SupabaseError};
use crate::utils::errors::AppError;

pub struct ProductService;

impl ProductService {
    /// All products, lowest id first.
    #[instrument(skip(supabase))]
    pub async fn get_all_products(supabase: &SupabaseClient) -> Result<Vec<Product>, AppError> {
        debug!("Fetching product catalog from the store");

        let products = supabase
            .select::<Product>("products", &[("select", "*"), ("order", "id.asc")])
            .await
            .map_err(|e| {
                error!(error = %e, "Store error fetching products");
                AppError::internal(anyhow::anyhow!("Error obteniendo productos"))
            })?;

        debug!(count = products.len(), "Products fetched");

        Ok(products)
    }

    #[instrument(skip(supabase), fields(product.id = %product_id))]
    pub async fn get_product(
        supabase: &SupabaseClient,
        product_id: i64,
    ) -> Result<Product, AppError> {
        let id_filter = format!("eq.{product_id}");

        supabase
            .select_single("products", &[("select", "*"), ("id", id_filter.as_str())])
            .await
            .map_err(|e| match e {
                SupabaseError::NotFound(_) => {
                    debug!("Product not found");
                    AppError::not_found(anyhow::anyhow!("Producto no encontrado"))
                }
                e => {
                    error!(error = %e, "Store error fetching product");
                    AppError::internal(anyhow::anyhow!("Error interno"))
                }
            })
    }

    #[instrument(skip(supabase, dto), fields(product.name = %dto.name))]
    pub async fn create_product(
        supabase: &SupabaseClient,
        dto: CreateProductDto,
    ) -> Result<Product, AppError> {
        debug!("Creating product");

        let product: Product = supabase
            .insert_returning("products", &dto)
            .await
            .map_err(|e| {
                error!(error = %e, "Store error creating product");
                AppError::internal(anyhow::anyhow!("Error creando producto"))
            })?;

        info!(product.id = %product.id, product.name = %product.name, "Product created");

        Ok(product)
    }

    #[instrument(skip(supabase, dto), fields(product.id = %product_id))]
    pub async fn update_product(
        supabase: &SupabaseClient,
        product_id: i64,
        dto: UpdateProductDto,
    ) -> Result<Product, AppError> {
        debug!("Updating product");

        let id_filter = format!("eq.{product_id}");
        let product: Product = supabase
            .update_single("products", &[("id", id_filter.as_str())], &dto)
            .await
            .map_err(|e| match e {
                SupabaseError::NotFound(_) => {
                    debug!("Product not found for update");
                    AppError::not_found(anyhow::anyhow!("Producto no encontrado"))
                }
                e => {
                    error!(error = %e, "Store error updating product");
                    AppError::internal(anyhow::anyhow!("Error actualizando producto"))
                }
            })?;

        info!(product.id = %product.id, "Product updated");

        Ok(product)
    }

    #[instrument(skip(supabase), fields(product.id = %product_id))]
    pub async fn delete_product(
        supabase: &SupabaseClient,
        product_id: i64,
    ) -> Result<(), AppError> {
        debug!("Deleting product");

        let id_filter = format!("eq.{product_id}");
        let deleted = supabase
            .delete("products", &[("id", id_filter.as_str())])
            .await
            .map_err(|e| {
                error!(error = %e, "Store error deleting product");
                AppError::internal(anyhow::anyhow!("Error eliminando producto"))
            })?;

        if deleted == 0 {
            debug!("Product not found for deletion");
            return Err(AppError::not_found(anyhow::anyhow!(
                "Producto no encontrado"
            )));
        }

        info!("Product deleted");

        Ok(())
    }
}
