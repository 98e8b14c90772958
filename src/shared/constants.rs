// =============================================================================
// PLACEHOLDER IMAGES
// =============================================================================

/// Image shown for a supply until a real one is uploaded
pub const IMG_DEFAULT_INSUMO: &str = "/img/default/insumo.png";

/// Image shown for a product until a real one is uploaded
pub const IMG_DEFAULT_PRODUCTO: &str = "/img/default/producto.png";

/// Image shown for a promotion until a real one is uploaded
pub const IMG_DEFAULT_PROMOCION: &str = "/img/default/promocion.png";

// =============================================================================
// FIELD LIMITS
// =============================================================================

pub const MAX_NOMBRE_LEN: u64 = 100;

pub const MAX_DESCRIPCION_LEN: u64 = 500;

pub const MAX_IMG_URL_LEN: u64 = 2048;
