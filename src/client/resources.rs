//! What the dashboard knows about each catalog resource: where it lives,
//! how it is named in notifications, and how a fetched item pre-fills a form.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::features::categorias::dtos::CategoriaResponseDto;
use crate::features::categorias::models::CategoriaTipo;
use crate::features::insumos::dtos::InsumoResponseDto;
use crate::features::insumos::models::TipoMedida;
use crate::features::productos::dtos::ProductoResponseDto;
use crate::features::promociones::dtos::PromocionResponseDto;
use crate::features::usuarios::dtos::UsuarioResponseDto;
use crate::schemas::{CategoriaInput, InsumoInput, ProductoInput, PromocionInput, Schema};
use crate::shared::constants::{IMG_DEFAULT_INSUMO, IMG_DEFAULT_PRODUCTO, IMG_DEFAULT_PROMOCION};

/// Mutation kinds, used to word notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accion {
    Crear,
    Actualizar,
    Desactivar,
}

impl Accion {
    fn infinitivo(self) -> &'static str {
        match self {
            Accion::Crear => "crear",
            Accion::Actualizar => "actualizar",
            Accion::Desactivar => "desactivar",
        }
    }

    fn participio(self, femenino: bool) -> String {
        let raiz = match self {
            Accion::Crear => "cread",
            Accion::Actualizar => "actualizad",
            Accion::Desactivar => "desactivad",
        };
        format!("{}{}", raiz, if femenino { "a" } else { "o" })
    }
}

/// Grammatical name of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Noun {
    pub singular: &'static str,
    pub femenino: bool,
}

impl Noun {
    fn articulo(&self) -> &'static str {
        if self.femenino {
            "la"
        } else {
            "el"
        }
    }

    /// e.g. "Insumo Creado"
    pub fn success_title(&self, accion: Accion) -> String {
        format!(
            "{} {}",
            capitalize(self.singular),
            capitalize(&accion.participio(self.femenino))
        )
    }

    /// e.g. "El insumo ha sido creado exitosamente"
    pub fn success_description(&self, accion: Accion) -> String {
        format!(
            "{} {} ha sido {} exitosamente",
            capitalize(self.articulo()),
            self.singular,
            accion.participio(self.femenino)
        )
    }

    /// e.g. "Ocurrió un error al crear el insumo"
    pub fn failure_description(&self, accion: Accion) -> String {
        format!(
            "Ocurrió un error al {} {} {}",
            accion.infinitivo(),
            self.articulo(),
            self.singular
        )
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A readable collection of the catalog API
pub trait Resource: Send + Sync {
    type Item: Serialize + DeserializeOwned + Clone + Send + Sync;

    /// Collection route, e.g. `/api/insumo`
    fn path(&self) -> String;

    /// Cache namespace; every query of this resource is stored under it
    fn key(&self) -> String;

    fn noun(&self) -> Noun;

    fn item_id<'a>(&self, item: &'a Self::Item) -> &'a str;

    fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.path(), id)
    }

    /// Text shown when a query fails
    fn load_error(&self) -> String;

    /// Cache namespaces of other resources whose items embed data of this one
    fn dependents(&self) -> Vec<String> {
        Vec::new()
    }
}

/// A resource the dashboard can create and update through a form
pub trait Editable: Resource {
    type Input: Schema + Serialize + Clone + Default + Send + Sync;

    /// Family of the categories offered by the form, if it has a category field
    fn categoria_tipo(&self) -> Option<CategoriaTipo>;

    /// Values of an empty create form
    fn defaults(&self) -> Self::Input {
        Self::Input::default()
    }

    /// Values of an update form for `item`
    fn prefill(&self, item: &Self::Item) -> Self::Input;

    fn set_categoria(&self, _input: &mut Self::Input, _id: &str) {}

    fn set_img_url(&self, _input: &mut Self::Input, _url: &str) {}

    /// Image restored when an upload fails
    fn placeholder_img(&self) -> Option<&'static str> {
        None
    }
}

/// Resources exposing `DELETE` as a soft delete
pub trait Deactivable: Editable {}

// =============================================================================
// INSUMOS
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct Insumos;

impl Resource for Insumos {
    type Item = InsumoResponseDto;

    fn path(&self) -> String {
        "/api/insumo".to_string()
    }

    fn key(&self) -> String {
        "insumos".to_string()
    }

    fn noun(&self) -> Noun {
        Noun {
            singular: "insumo",
            femenino: false,
        }
    }

    fn item_id<'a>(&self, item: &'a InsumoResponseDto) -> &'a str {
        &item.id_insumo
    }

    fn load_error(&self) -> String {
        "Error al leer los insumos".to_string()
    }
}

impl Editable for Insumos {
    type Input = InsumoInput;

    fn categoria_tipo(&self) -> Option<CategoriaTipo> {
        Some(CategoriaTipo::Insumo)
    }

    fn defaults(&self) -> InsumoInput {
        InsumoInput {
            medida: TipoMedida::Unidad.as_str().to_string(),
            ..Default::default()
        }
    }

    fn prefill(&self, item: &InsumoResponseDto) -> InsumoInput {
        InsumoInput {
            nombre: item.nombre.clone(),
            cantidad: Some(item.cantidad),
            medida: item.medida.as_str().to_string(),
            id_cat_insumo: item.id_cat_insumo.clone(),
            img_url: item.img_url.clone(),
            estado: Some(item.estado.as_str().to_string()),
        }
    }

    fn set_categoria(&self, input: &mut InsumoInput, id: &str) {
        input.id_cat_insumo = id.to_string();
    }

    fn set_img_url(&self, input: &mut InsumoInput, url: &str) {
        input.img_url = url.to_string();
    }

    fn placeholder_img(&self) -> Option<&'static str> {
        Some(IMG_DEFAULT_INSUMO)
    }
}

impl Deactivable for Insumos {}

// =============================================================================
// PRODUCTOS
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct Productos;

impl Resource for Productos {
    type Item = ProductoResponseDto;

    fn path(&self) -> String {
        "/api/producto".to_string()
    }

    fn key(&self) -> String {
        "productos".to_string()
    }

    fn noun(&self) -> Noun {
        Noun {
            singular: "producto",
            femenino: false,
        }
    }

    fn item_id<'a>(&self, item: &'a ProductoResponseDto) -> &'a str {
        &item.id_producto
    }

    fn load_error(&self) -> String {
        "Error al leer los productos".to_string()
    }
}

impl Editable for Productos {
    type Input = ProductoInput;

    fn categoria_tipo(&self) -> Option<CategoriaTipo> {
        Some(CategoriaTipo::Producto)
    }

    fn defaults(&self) -> ProductoInput {
        ProductoInput {
            precio_base: Some(rust_decimal::Decimal::ZERO),
            ..Default::default()
        }
    }

    fn prefill(&self, item: &ProductoResponseDto) -> ProductoInput {
        ProductoInput {
            nombre: item.nombre.clone(),
            descripcion: item.descripcion.clone(),
            precio_base: Some(item.precio_base),
            id_cat_producto: item.id_cat_producto.clone(),
            img_url: item.img_url.clone(),
            estado: Some(item.estado.as_str().to_string()),
        }
    }

    fn set_categoria(&self, input: &mut ProductoInput, id: &str) {
        input.id_cat_producto = id.to_string();
    }

    fn set_img_url(&self, input: &mut ProductoInput, url: &str) {
        input.img_url = url.to_string();
    }

    fn placeholder_img(&self) -> Option<&'static str> {
        Some(IMG_DEFAULT_PRODUCTO)
    }
}

impl Deactivable for Productos {}

// =============================================================================
// PROMOCIONES
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct Promociones;

impl Resource for Promociones {
    type Item = PromocionResponseDto;

    fn path(&self) -> String {
        "/api/promocion".to_string()
    }

    fn key(&self) -> String {
        "promociones".to_string()
    }

    fn noun(&self) -> Noun {
        Noun {
            singular: "promoción",
            femenino: true,
        }
    }

    fn item_id<'a>(&self, item: &'a PromocionResponseDto) -> &'a str {
        &item.id_promocion
    }

    fn load_error(&self) -> String {
        "Error al leer las promociones".to_string()
    }
}

impl Editable for Promociones {
    type Input = PromocionInput;

    fn categoria_tipo(&self) -> Option<CategoriaTipo> {
        Some(CategoriaTipo::Promocion)
    }

    fn defaults(&self) -> PromocionInput {
        let hoy = chrono::Utc::now().date_naive();
        PromocionInput {
            precio_base: Some(rust_decimal::Decimal::ZERO),
            precio_oferta: Some(rust_decimal::Decimal::ZERO),
            fecha_inicio: Some(hoy),
            fecha_fin: Some(hoy),
            ..Default::default()
        }
    }

    fn prefill(&self, item: &PromocionResponseDto) -> PromocionInput {
        PromocionInput {
            nombre: item.nombre.clone(),
            descripcion: item.descripcion.clone(),
            precio_base: Some(item.precio_base),
            precio_oferta: Some(item.precio_oferta),
            fecha_inicio: Some(item.fecha_inicio),
            fecha_fin: Some(item.fecha_fin),
            dia_promocion: item
                .dia_promocion
                .iter()
                .map(|d| d.as_str().to_string())
                .collect(),
            id_cat_promocion: item.id_cat_promocion.clone(),
            img_url: item.img_url.clone(),
            productos: item.productos.clone(),
        }
    }

    fn set_categoria(&self, input: &mut PromocionInput, id: &str) {
        input.id_cat_promocion = id.to_string();
    }

    fn set_img_url(&self, input: &mut PromocionInput, url: &str) {
        input.img_url = url.to_string();
    }

    fn placeholder_img(&self) -> Option<&'static str> {
        Some(IMG_DEFAULT_PROMOCION)
    }
}

// =============================================================================
// CATEGORIAS
// =============================================================================

/// Categories of one family
#[derive(Debug, Clone, Copy)]
pub struct Categorias(pub CategoriaTipo);

impl Resource for Categorias {
    type Item = CategoriaResponseDto;

    fn path(&self) -> String {
        format!("/api/categoria/{}", self.0.as_str())
    }

    fn key(&self) -> String {
        format!("categorias_{}", self.0.as_str())
    }

    fn noun(&self) -> Noun {
        Noun {
            singular: "categoría",
            femenino: true,
        }
    }

    fn item_id<'a>(&self, item: &'a CategoriaResponseDto) -> &'a str {
        &item.id_categoria
    }

    fn load_error(&self) -> String {
        format!("Error al leer las categorias de {}", self.0.as_str())
    }

    /// Insumo, producto and promoción items carry their category name
    fn dependents(&self) -> Vec<String> {
        let dependent = match self.0 {
            CategoriaTipo::Insumo => Insumos.key(),
            CategoriaTipo::Producto => Productos.key(),
            CategoriaTipo::Promocion => Promociones.key(),
        };
        vec![dependent]
    }
}

impl Editable for Categorias {
    type Input = CategoriaInput;

    fn categoria_tipo(&self) -> Option<CategoriaTipo> {
        None
    }

    fn prefill(&self, item: &CategoriaResponseDto) -> CategoriaInput {
        CategoriaInput {
            nombre: item.nombre.clone(),
            estado: Some(item.estado.as_str().to_string()),
        }
    }
}

impl Deactivable for Categorias {}

// =============================================================================
// USUARIOS
// =============================================================================

/// Users are read-only apart from their points balance
#[derive(Debug, Clone, Copy, Default)]
pub struct Usuarios;

impl Resource for Usuarios {
    type Item = UsuarioResponseDto;

    fn path(&self) -> String {
        "/api/usuario".to_string()
    }

    fn key(&self) -> String {
        "usuarios".to_string()
    }

    fn noun(&self) -> Noun {
        Noun {
            singular: "usuario",
            femenino: false,
        }
    }

    fn item_id<'a>(&self, item: &'a UsuarioResponseDto) -> &'a str {
        &item.id_usuario
    }

    fn load_error(&self) -> String {
        "Error al leer los usuarios".to_string()
    }
}
