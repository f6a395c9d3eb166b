//! Boilerplate shared by the layer types.

/// Implements the [`LayerTrait`](crate::layers::base::LayerTrait) accessors
/// that read and write a `LayerProperties` field.
///
/// Usage, inside an `impl LayerTrait for MyLayer` block:
/// ```ignore
/// impl_layer_trait!(properties);
/// ```
#[macro_export]
macro_rules! impl_layer_trait {
    ($properties_field:ident) => {
        fn id(&self) -> &str {
            &self.$properties_field.id
        }

        fn name(&self) -> &str {
            &self.$properties_field.name
        }

        fn layer_type(&self) -> $crate::layers::base::LayerType {
            self.$properties_field.layer_type
        }

        fn z_index(&self) -> i32 {
            self.$properties_field.z_index
        }

        fn is_visible(&self) -> bool {
            self.$properties_field.visible
        }

        fn in_control(&self) -> bool {
            self.$properties_field.control
        }

        fn is_interactive(&self) -> bool {
            self.$properties_field.interactive
        }

        fn pane(&self) -> Option<$crate::layers::pane::StackingPlane> {
            self.$properties_field.pane
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    };
}
