//! Vehicle reference data for the form layer
//!
//! Makes and models commonly insured on the Zambian market, used to drive
//! the make/model selectors. Purely advisory: validation only requires the
//! fields to be non-empty, so unlisted vehicles can still be quoted.

/// A vehicle make with its common models
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleMake {
    pub id: &'static str,
    pub name: &'static str,
    pub models: &'static [&'static str],
    /// Listed first in the selector
    pub popular: bool,
}

/// Makes commonly insured on the Zambian market
pub const VEHICLE_MAKES: &[VehicleMake] = &[
    VehicleMake {
        id: "toyota",
        name: "Toyota",
        models: &[
            "Corolla", "Camry", "RAV4", "Prado", "Hilux", "Fortuner", "Vitz", "Axio",
        ],
        popular: true,
    },
    VehicleMake {
        id: "mazda",
        name: "Mazda",
        models: &["Demio", "Axela", "Atenza", "CX-5", "BT-50"],
        popular: true,
    },
    VehicleMake {
        id: "nissan",
        name: "Nissan",
        models: &["March", "Note", "Sunny", "X-Trail", "Navara", "Patrol"],
        popular: true,
    },
    VehicleMake {
        id: "honda",
        name: "Honda",
        models: &["Fit", "Civic", "Accord", "CR-V", "HR-V"],
        popular: true,
    },
    VehicleMake {
        id: "subaru",
        name: "Subaru",
        models: &["Impreza", "Legacy", "Outback", "Forester", "XV"],
        popular: false,
    },
    VehicleMake {
        id: "mitsubishi",
        name: "Mitsubishi",
        models: &["Colt", "Lancer", "Pajero", "L200", "ASX"],
        popular: false,
    },
    VehicleMake {
        id: "hyundai",
        name: "Hyundai",
        models: &["i10", "i20", "Elantra", "Tucson", "Santa Fe"],
        popular: false,
    },
    VehicleMake {
        id: "kia",
        name: "Kia",
        models: &["Picanto", "Rio", "Cerato", "Sportage", "Sorento"],
        popular: false,
    },
    VehicleMake {
        id: "ford",
        name: "Ford",
        models: &["Fiesta", "Focus", "EcoSport", "Ranger", "Everest"],
        popular: false,
    },
    VehicleMake {
        id: "volkswagen",
        name: "Volkswagen",
        models: &["Polo", "Golf", "Jetta", "Tiguan", "Amarok"],
        popular: false,
    },
];

/// Looks up a make by its identifier
pub fn find_make(id: &str) -> Option<&'static VehicleMake> {
    VEHICLE_MAKES.iter().find(|make| make.id == id)
}
