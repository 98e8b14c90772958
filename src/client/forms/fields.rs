use crate::client::resources::{Categorias, Insumos, Productos, Promociones};
use crate::features::insumos::models::TipoMedida;
use crate::features::promociones::models::DiaSemana;

/// One entry of a closed option list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Number,
    Date,
    Image,
    Select(Vec<SelectOption>),
    MultiSelect(Vec<SelectOption>),
}

/// How a form renders one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
        }
    }

    fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Option lists fetched before a form can be edited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormOptions {
    /// Active categories of the form's family
    pub categorias: Vec<SelectOption>,
    /// Active products, for forms that link them
    pub productos: Vec<SelectOption>,
}

/// Field layout of an entity form
pub trait FormLayout {
    fn fields(&self, options: &FormOptions) -> Vec<FieldSpec>;

    /// Whether the form offers the active products as options
    fn links_productos(&self) -> bool {
        false
    }
}

fn medidas() -> Vec<SelectOption> {
    TipoMedida::ALL
        .into_iter()
        .map(|m| SelectOption::new(m.as_str(), m.as_str()))
        .collect()
}

fn dias() -> Vec<SelectOption> {
    DiaSemana::ALL
        .into_iter()
        .map(|d| SelectOption::new(d.as_str(), d.as_str()))
        .collect()
}

impl FormLayout for Insumos {
    fn fields(&self, options: &FormOptions) -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("nombre", "Nombre", FieldKind::Text),
            FieldSpec::new("cantidad", "Cantidad", FieldKind::Number),
            FieldSpec::new("medida", "Medida", FieldKind::Select(medidas())),
            FieldSpec::new(
                "id_cat_insumo",
                "Categoría",
                FieldKind::Select(options.categorias.clone()),
            ),
            FieldSpec::new("img_url", "Imagen", FieldKind::Image),
        ]
    }
}

impl FormLayout for Productos {
    fn fields(&self, options: &FormOptions) -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("nombre", "Nombre", FieldKind::Text),
            FieldSpec::new("descripcion", "Descripción", FieldKind::TextArea).optional(),
            FieldSpec::new("precio_base", "Precio base", FieldKind::Number),
            FieldSpec::new(
                "id_cat_producto",
                "Categoría",
                FieldKind::Select(options.categorias.clone()),
            ),
            FieldSpec::new("img_url", "Imagen", FieldKind::Image),
        ]
    }
}

impl FormLayout for Promociones {
    fn fields(&self, options: &FormOptions) -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("nombre", "Nombre", FieldKind::Text),
            FieldSpec::new("descripcion", "Descripción", FieldKind::TextArea).optional(),
            FieldSpec::new("precio_base", "Precio base", FieldKind::Number),
            FieldSpec::new("precio_oferta", "Precio oferta", FieldKind::Number),
            FieldSpec::new("fecha_inicio", "Fecha de inicio", FieldKind::Date),
            FieldSpec::new("fecha_fin", "Fecha de fin", FieldKind::Date),
            FieldSpec::new("dia_promocion", "Días", FieldKind::MultiSelect(dias())).optional(),
            FieldSpec::new(
                "id_cat_promocion",
                "Categoría",
                FieldKind::Select(options.categorias.clone()),
            ),
            FieldSpec::new(
                "productos",
                "Productos",
                FieldKind::MultiSelect(options.productos.clone()),
            )
            .optional(),
            FieldSpec::new("img_url", "Imagen", FieldKind::Image),
        ]
    }

    fn links_productos(&self) -> bool {
        true
    }
}

impl FormLayout for Categorias {
    fn fields(&self, _options: &FormOptions) -> Vec<FieldSpec> {
        vec![FieldSpec::new("nombre", "Nombre", FieldKind::Text)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_fields_offer_closed_sets() {
        let fields = Insumos.fields(&FormOptions::default());
        let medida = fields.iter().find(|f| f.name == "medida").unwrap();
        match &medida.kind {
            FieldKind::Select(options) => {
                let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
                assert_eq!(values, vec!["KG", "GR", "LT", "ML", "UNIDAD"]);
            }
            other => panic!("unexpected kind {:?}", other),
        }

        let fields = Promociones.fields(&FormOptions::default());
        let dias = fields.iter().find(|f| f.name == "dia_promocion").unwrap();
        assert!(matches!(&dias.kind, FieldKind::MultiSelect(o) if o.len() == 7));
        assert!(!dias.required);
    }

    #[test]
    fn test_category_field_uses_fetched_options() {
        let options = FormOptions {
            categorias: vec![SelectOption::new("c1", "Bebidas")],
            productos: Vec::new(),
        };
        let fields = Productos.fields(&options);
        let cat = fields.iter().find(|f| f.name == "id_cat_producto").unwrap();
        assert_eq!(cat.kind, FieldKind::Select(options.categorias.clone()));
    }
}
