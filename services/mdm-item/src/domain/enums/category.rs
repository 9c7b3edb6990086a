//! 物料分类与子类型目录

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UnknownChoice;

/// 库存分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Biological,
    Chemical,
    Packaging,
    Plasticwares,
    Electrical,
    Equipment,
    Consumables,
    Stationery,
}

const BIOLOGICAL_SUBTYPES: &[&str] = &["Raw Material", "Additive", "Carrier", "Finished Product"];

const CHEMICAL_SUBTYPES: &[&str] = &[
    "Solvent", "Flammable Solid", "Compressed Gas", "Oxidizer", "Corrosive Acid",
    "Corrosive Base", "Reactive", "Toxin", "Waste", "Peroxide-Former", "Biohazard",
    "Nutrient Input", "Acid", "Base", "Salt", "Buffer", "Catalyst", "Reagent", "Standard",
    "Reference", "Indicator", "Dye", "Stabilizer", "Preservative", "Antioxidant",
    "Emulsifier", "Thickener", "Flavoring", "Coloring", "Sweetener", "Nutrient", "Vitamin",
    "Mineral", "Amino Acid", "Peptide", "Protein", "Enzyme", "Hormone", "Antibiotic",
    "Antiviral", "Antifungal", "Antiparasitic", "Immunosuppressant", "Immunostimulant",
    "Analgesic", "Anti-inflammatory", "Antipyretic", "Antihistamine", "Decongestant",
    "Expectorant", "Laxative", "Antidiarrheal", "Antacid", "Antiemetic", "Diuretic",
    "Vasodilator", "Vasoconstrictor", "Bronchodilator", "Muscle Relaxant", "Sedative",
    "Stimulant", "Anxiolytic", "Antidepressant", "Antipsychotic", "Mood Stabilizer",
    "Anticonvulsant", "Antiarrhythmic", "Anticoagulant", "Thrombolytic", "Hemostatic",
    "Plasma Expander", "Electrolyte", "Alkalizing", "Acidifying", "Osmotic Diuretic",
    "Carbonic Anhydrase Inhibitor", "Aldosterone Antagonist", "Beta Blocker",
    "Alpha Blocker", "Calcium Channel Blocker", "ACE Inhibitor", "ARB", "Renin Inhibitor",
    "Statin", "Fibrate", "Niacin", "Bile Acid Sequestrant", "PCSK9 Inhibitor", "Insulin",
    "Sulfonylurea", "Biguanide", "Thiazolidinedione", "DPP-4 Inhibitor", "GLP-1 Agonist",
    "SGLT2 Inhibitor", "Alpha Glucosidase Inhibitor", "Meglitinide",
];

const PACKAGING_SUBTYPES: &[&str] = &["Bottle", "Cap", "Label", "Blister", "Desiccant", "Pouch", "Box"];

const PLASTICWARES_SUBTYPES: &[&str] = &["Tube", "Rack", "Pipette", "Container", "Tip Box", "Plate"];

const ELECTRICAL_SUBTYPES: &[&str] = &["Sensor", "Connector", "Panel", "Wiring", "Controller"];

const EQUIPMENT_SUBTYPES: &[&str] = &["Machine", "Tool", "Filter", "Pump", "Glassware", "Valve"];

const CONSUMABLES_SUBTYPES: &[&str] = &["Glove", "Mask", "Battery", "Wipe", "Apron", "Cleaning Agent"];

const STATIONERY_SUBTYPES: &[&str] = &["Notebook", "Marker", "File", "Tape", "Binder"];

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Biological,
        Category::Chemical,
        Category::Packaging,
        Category::Plasticwares,
        Category::Electrical,
        Category::Equipment,
        Category::Consumables,
        Category::Stationery,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Category::Biological => "Biological",
            Category::Chemical => "Chemical",
            Category::Packaging => "Packaging",
            Category::Plasticwares => "Plasticwares",
            Category::Electrical => "Electrical",
            Category::Equipment => "Equipment",
            Category::Consumables => "Consumables",
            Category::Stationery => "Stationery",
        }
    }

    /// 该分类允许的子类型
    pub fn subtype_choices(&self) -> &'static [&'static str] {
        match self {
            Category::Biological => BIOLOGICAL_SUBTYPES,
            Category::Chemical => CHEMICAL_SUBTYPES,
            Category::Packaging => PACKAGING_SUBTYPES,
            Category::Plasticwares => PLASTICWARES_SUBTYPES,
            Category::Electrical => ELECTRICAL_SUBTYPES,
            Category::Equipment => EQUIPMENT_SUBTYPES,
            Category::Consumables => CONSUMABLES_SUBTYPES,
            Category::Stationery => STATIONERY_SUBTYPES,
        }
    }

    pub fn allows_subtype(&self, subtype: &str) -> bool {
        self.subtype_choices().contains(&subtype)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Category {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.code() == s)
            .ok_or_else(|| UnknownChoice::new("category", s))
    }
}
