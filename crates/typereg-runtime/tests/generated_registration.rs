//! Registration through a function shaped exactly like typereg output

mod widgets {
    pub mod shapes {
        #[derive(Debug, Default, PartialEq)]
        pub struct Circle {
            pub radius: u32,
        }

        #[derive(Debug, Default, PartialEq)]
        pub struct Slot<T = u8> {
            pub value: T,
        }
    }
}

// Code generated by typereg. DO NOT EDIT.

use typereg_runtime as discovery;
use widgets::shapes as widgets_shapes;
pub fn register_for_discovery() -> Result<(), discovery::RegistryError> {
    discovery::register(
        "widgets::shapes",
        "Circle",
        Box::new(<widgets_shapes::Circle>::default()),
    )?;
    discovery::register(
        "widgets::shapes",
        "Slot",
        Box::new(<widgets_shapes::Slot>::default()),
    )?;
    Ok(())
}

#[test]
fn test_generated_function_populates_registry() -> Result<(), Box<dyn std::error::Error>> {
    register_for_discovery()?;

    let registry = typereg_runtime::registry();
    assert_eq!(registry.len(), 2);

    let circle = registry
        .get("widgets::shapes", "Circle")
        .and_then(|entry| entry.instance::<widgets::shapes::Circle>());
    assert_eq!(circle, Some(&widgets::shapes::Circle { radius: 0 }));

    let slot = registry
        .get("widgets::shapes", "Slot")
        .and_then(|entry| entry.instance::<widgets::shapes::Slot<u8>>());
    assert_eq!(slot, Some(&widgets::shapes::Slot { value: 0u8 }));

    // Running the generated function again after the first read is rejected
    assert!(register_for_discovery().is_err());
    Ok(())
}
