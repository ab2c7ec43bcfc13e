#![allow(dead_code)]

use delta_track_model::{PropertyDef, PropertyType, StructuredType, TypeRef};

/// Types shared by the integration tests.
pub struct Model {
    pub address: TypeRef,
    pub home_address: TypeRef,
    pub office_address: TypeRef,
    pub order: TypeRef,
    pub customer: TypeRef,
    pub vip_customer: TypeRef,
    pub node: TypeRef,
}

pub fn model() -> Model {
    let address = StructuredType::complex("Address")
        .property("City", PropertyType::Str)
        .property("Street", PropertyType::Str)
        .build()
        .unwrap();
    let home_address = StructuredType::complex("HomeAddress")
        .base(&address)
        .property("HomeNo", PropertyType::Int)
        .build()
        .unwrap();
    let office_address = StructuredType::complex("OfficeAddress")
        .base(&address)
        .property("OfficeNo", PropertyType::Int)
        .build()
        .unwrap();
    let order = StructuredType::entity("Order")
        .property("Id", PropertyType::Int)
        .property("Amount", PropertyType::Float)
        .property("ShippingAddress", PropertyType::structured("Address"))
        .build()
        .unwrap();
    let customer = StructuredType::entity("Customer")
        .property("Id", PropertyType::Int)
        .property("Name", PropertyType::Str)
        .property("Location", PropertyType::structured("Address"))
        .property_def(
            PropertyDef::new("Orders", PropertyType::collection_of(PropertyType::structured("Order")))
                .read_only()
                .nullable(false),
        )
        .open("DynamicProperties")
        .build()
        .unwrap();
    let vip_customer = StructuredType::entity("VipCustomer")
        .base(&customer)
        .property("Level", PropertyType::Int)
        .build()
        .unwrap();
    let node = StructuredType::complex("Node")
        .property("Value", PropertyType::Int)
        .property("Child", PropertyType::structured("Node"))
        .build()
        .unwrap();
    Model {
        address,
        home_address,
        office_address,
        order,
        customer,
        vip_customer,
        node,
    }
}
