//! Fixed seed data: the curated medication list, the extra-drug table used by
//! the generator, and mock dashboard records.

use chrono::NaiveDate;

use crate::models::{
    MedicationRecord, Order, OrderStatus, Price, Report, ReportKind, ReportStatus,
};

/// Curated medication entry.
struct SeedMedication {
    id: &'static str,
    name: &'static str,
    generic_name: &'static str,
    dosage: &'static str,
    category: &'static str,
    price: u32,
    requires_prescription: bool,
    description: &'static str,
    treats: &'static [&'static str],
    side_effects: &'static [&'static str],
    usage: &'static str,
    warnings: &'static [&'static str],
    interactions: &'static [&'static str],
    storage: &'static str,
    manufacturer: &'static str,
}

impl From<&SeedMedication> for MedicationRecord {
    fn from(s: &SeedMedication) -> Self {
        let owned = |items: &[&str]| items.iter().map(|i| i.to_string()).collect::<Vec<_>>();
        MedicationRecord {
            id: s.id.into(),
            name: s.name.into(),
            generic_name: s.generic_name.into(),
            dosage: s.dosage.into(),
            category: s.category.into(),
            price: Price::xaf(s.price),
            requires_prescription: s.requires_prescription,
            description: s.description.into(),
            treats: owned(s.treats),
            side_effects: owned(s.side_effects),
            usage: s.usage.into(),
            warnings: owned(s.warnings),
            interactions: owned(s.interactions),
            storage: s.storage.into(),
            manufacturer: s.manufacturer.into(),
        }
    }
}

const SEED_MEDICATIONS: &[SeedMedication] = &[
    SeedMedication {
        id: "m1",
        name: "Coartem",
        generic_name: "Artemether/Lumefantrine",
        dosage: "80/480mg",
        category: "Antimalarial",
        price: 2500,
        requires_prescription: false,
        description: "Coartem is a fixed-dose combination therapy widely used for the treatment of acute uncomplicated malaria caused by Plasmodium falciparum. It is effective against multi-drug resistant strains.",
        treats: &["Malaria", "Fever", "Chills", "Headache", "Muscle Pain"],
        side_effects: &["Headache", "Dizziness", "Loss of appetite", "Palpitations", "Weakness"],
        usage: "Take with food or milk/fatty drink for best absorption. Complete the full 3-day course (6 doses).",
        warnings: &[
            "Do not take during the first trimester of pregnancy unless prescribed.",
            "Avoid if you have a history of heart rhythm problems (QT prolongation).",
        ],
        interactions: &[
            "Grapefruit juice (increases absorption)",
            "Certain antidepressants",
            "Other antimalarials (Halofantrine)",
        ],
        storage: "Store below 30°C in a dry place protected from light.",
        manufacturer: "Novartis / MediPharma Global",
    },
    SeedMedication {
        id: "m2",
        name: "Amoxil",
        generic_name: "Amoxicillin",
        dosage: "500mg",
        category: "Antibiotic",
        price: 1500,
        requires_prescription: true,
        description: "Amoxil is a broad-spectrum penicillin antibiotic used to treat a wide variety of bacterial infections by stopping the growth of bacteria.",
        treats: &["Respiratory infections", "Ear infections", "Urinary tract infections", "Skin infections"],
        side_effects: &["Nausea", "Rash", "Diarrhea", "Vomiting"],
        usage: "Take every 8 hours. Complete the full course even if symptoms disappear.",
        warnings: &[
            "Do not use if allergic to penicillin or cephalosporins.",
            "May reduce effectiveness of oral contraceptives.",
        ],
        interactions: &["Allopurinol (increases rash risk)", "Blood thinners (Warfarin)", "Oral birth control pills"],
        storage: "Store at room temperature away from moisture and heat.",
        manufacturer: "GSK / Local Generics",
    },
    SeedMedication {
        id: "m3",
        name: "Doliprane",
        generic_name: "Paracetamol",
        dosage: "1000mg",
        category: "Analgesic",
        price: 500,
        requires_prescription: false,
        description: "Doliprane 1000mg is a high-strength analgesic and antipyretic used for the relief of moderate to severe pain and fever.",
        treats: &["Headache", "Fever", "Body aches", "Flu symptoms", "Toothache"],
        side_effects: &["Nausea (rare)", "Liver damage (high dose)", "Skin rash"],
        usage: "Take 1 tablet every 6-8 hours. Do not exceed 4g (4 tablets) daily.",
        warnings: &[
            "Overdose can cause severe liver failure.",
            "Do not combine with other paracetamol-containing products.",
            "Avoid alcohol while taking this medication.",
        ],
        interactions: &["Warfarin (blood thinner)", "Alcohol", "Isoniazid"],
        storage: "Store below 25°C.",
        manufacturer: "Sanofi",
    },
    SeedMedication {
        id: "m3b",
        name: "Doliprane",
        generic_name: "Paracetamol",
        dosage: "500mg",
        category: "Analgesic",
        price: 300,
        requires_prescription: false,
        description: "Common pain reliever and a fever reducer suitable for mild pain.",
        treats: &["Headache", "Fever", "Mild pain"],
        side_effects: &["Nausea (rare)"],
        usage: "Take 1-2 tablets every 4-6 hours.",
        warnings: &["Do not exceed recommended dose."],
        interactions: &["Alcohol"],
        storage: "Store below 25°C.",
        manufacturer: "Sanofi",
    },
    SeedMedication {
        id: "m4",
        name: "Lantus",
        generic_name: "Insulin Glargine",
        dosage: "100IU/ml",
        category: "Diabetes",
        price: 12000,
        requires_prescription: true,
        description: "Lantus is a long-acting basal insulin analogue used to control high blood sugar in adults and children with diabetes mellitus.",
        treats: &["High blood sugar", "Type 1 Diabetes", "Type 2 Diabetes"],
        side_effects: &["Hypoglycemia (low blood sugar)", "Weight gain", "Injection site reaction", "Swelling"],
        usage: "Inject subcutaneously once daily at the same time each day. Rotate injection sites.",
        warnings: &["Monitor blood sugar regularly.", "Do not mix with other insulins in the same syringe."],
        interactions: &["Beta-blockers (may mask hypoglycemia)", "Steroids", "Diuretics"],
        storage: "Keep refrigerated (2°C-8°C). Once opened, can be kept at room temp for 28 days.",
        manufacturer: "Sanofi",
    },
    SeedMedication {
        id: "m5",
        name: "Ventolin",
        generic_name: "Salbutamol",
        dosage: "100mcg",
        category: "Respiratory",
        price: 4000,
        requires_prescription: true,
        description: "Ventolin is a rapid-acting bronchodilator used to relieve symptoms of asthma and chronic obstructive pulmonary disease (COPD) such as coughing, wheezing and feeling breathless.",
        treats: &["Asthma attacks", "Wheezing", "Shortness of breath", "COPD"],
        side_effects: &["Tremors", "Nervousness", "Palpitations", "Headache"],
        usage: "1-2 puffs every 4-6 hours as needed for symptom relief.",
        warnings: &[
            "Seek medical help if inhaler stops working effectively.",
            "Use with caution in patients with heart disease.",
        ],
        interactions: &["Beta-blockers", "Diuretics", "Digoxin"],
        storage: "Store below 30°C. Protect from frost and direct sunlight.",
        manufacturer: "GSK",
    },
    SeedMedication {
        id: "m6",
        name: "Viraday",
        generic_name: "Tenofovir/Lamivudine",
        dosage: "300/300mg",
        category: "Antiretroviral",
        price: 0,
        requires_prescription: true,
        description: "A complete HIV-1 treatment regimen in a single tablet, combining three antiretroviral agents to suppress viral load.",
        treats: &["HIV-1 Infection"],
        side_effects: &["Nausea", "Dizziness", "Kidney issues", "Sleep problems"],
        usage: "Take one tablet once daily on an empty stomach, preferably at bedtime.",
        warnings: &[
            "Do not stop taking without medical advice.",
            "May cause lactic acidosis (rare but serious).",
        ],
        interactions: &["Other nephrotoxic drugs", "Orlistat"],
        storage: "Store in original container below 30°C.",
        manufacturer: "Cipla",
    },
    SeedMedication {
        id: "m7",
        name: "Advil",
        generic_name: "Ibuprofen",
        dosage: "400mg",
        category: "Analgesic",
        price: 1000,
        requires_prescription: false,
        description: "Non-steroidal anti-inflammatory drug (NSAID) used to reduce fever and treat pain or inflammation caused by many conditions.",
        treats: &["Inflammation", "Pain", "Fever", "Arthritis", "Menstrual cramps"],
        side_effects: &["Stomach upset", "Heartburn", "Ulcers", "Dizziness"],
        usage: "Take with food or milk to prevent stomach upset.",
        warnings: &[
            "Risk of stomach bleeding.",
            "Do not take if you have aspirin asthma.",
            "Avoid in late pregnancy.",
        ],
        interactions: &["Aspirin", "Blood thinners", "Corticosteroids"],
        storage: "Store at room temperature.",
        manufacturer: "Pfizer",
    },
    SeedMedication {
        id: "m8",
        name: "Zithromax",
        generic_name: "Azithromycin",
        dosage: "500mg",
        category: "Antibiotic",
        price: 3000,
        requires_prescription: true,
        description: "Zithromax is a macrolide antibiotic used to treat mild to moderate bacterial infections.",
        treats: &["Throat infections", "Pneumonia", "Typhoid", "Sinusitis"],
        side_effects: &["Diarrhea", "Nausea", "Abdominal pain", "Vomiting"],
        usage: "Take once daily for 3 days (or as prescribed). Can be taken with or without food.",
        warnings: &["May cause heart rhythm changes.", "Discontinue if allergic reaction occurs."],
        interactions: &["Antacids (separate by 2 hours)", "Warfarin"],
        storage: "Store below 30°C.",
        manufacturer: "Pfizer",
    },
    SeedMedication {
        id: "m10",
        name: "Mopral",
        generic_name: "Omeprazole",
        dosage: "20mg",
        category: "Gastric",
        price: 2000,
        requires_prescription: false,
        description: "Proton pump inhibitor (PPI) that decreases the amount of acid produced in the stomach.",
        treats: &["Acid reflux (GERD)", "Heartburn", "Ulcers", "Gastritis"],
        side_effects: &["Headache", "Stomach pain", "Gas", "Nausea"],
        usage: "Take in the morning before breakfast with a glass of water. Do not crush or chew.",
        warnings: &["Long term use may affect bone density.", "Masks symptoms of gastric cancer."],
        interactions: &["Clopidogrel", "Iron supplements (reduces absorption)"],
        storage: "Store in a dry place below 25°C.",
        manufacturer: "AstraZeneca",
    },
];

/// The curated medication list, in catalog order.
pub fn seed_medications() -> Vec<MedicationRecord> {
    SEED_MEDICATIONS.iter().map(MedicationRecord::from).collect()
}

/// Row of the extra-drug table: (name, generic name, dosage, category).
pub type ExtraDrug = (&'static str, &'static str, &'static str, &'static str);

/// Drugs the generator expands into the catalogue batch.
pub const EXTRA_DRUGS: &[ExtraDrug] = &[
    ("Cipro", "Ciprofloxacin", "500mg", "Antibiotic"),
    ("Augmentin", "Amoxicillin/Clavulanate", "625mg", "Antibiotic"),
    ("Flagyl", "Metronidazole", "400mg", "Antibiotic"),
    ("Doxy", "Doxycycline", "100mg", "Antibiotic"),
    ("Efferalgan", "Paracetamol", "500mg", "Analgesic"),
    ("Voltaren", "Diclofenac", "50mg", "Analgesic"),
    ("Tramadol", "Tramadol", "50mg", "Analgesic"),
    ("Asprin", "Acetylsalicylic acid", "100mg", "Cardiovascular"),
    ("Amlodipine", "Amlodipine", "5mg", "Cardiovascular"),
    ("Losartan", "Losartan", "50mg", "Cardiovascular"),
    ("Atorvastatin", "Atorvastatin", "20mg", "Cardiovascular"),
    ("Metformin", "Metformin", "500mg", "Diabetes"),
    ("Glibenclamide", "Glibenclamide", "5mg", "Diabetes"),
    ("Vitamin C", "Ascorbic Acid", "500mg", "Vitamin"),
    ("Neurobion", "B-Complex", "Tablet", "Vitamin"),
    ("Ferrous", "Ferrous Sulphate", "200mg", "Vitamin"),
    ("Calcium", "Calcium + D3", "500mg", "Vitamin"),
    ("Zinc", "Zinc Sulphate", "20mg", "Vitamin"),
    ("Loratadine", "Loratadine", "10mg", "Antihistamine"),
    ("Cetirizine", "Cetirizine", "10mg", "Antihistamine"),
    ("Promethazine", "Promethazine", "25mg", "Antihistamine"),
    ("Gaviscon", "Alginate", "Syrup", "Gastric"),
    ("Maalox", "Al/Mg Hydroxide", "Tablet", "Gastric"),
    ("Spasfon", "Phloroglucinol", "80mg", "Analgesic"),
    ("Buscopan", "Hyoscine", "10mg", "Analgesic"),
    ("Imodium", "Loperamide", "2mg", "Gastric"),
    ("Vermox", "Mebendazole", "100mg", "Antibiotic"),
    ("Zentel", "Albendazole", "400mg", "Antibiotic"),
    ("Prednisolone", "Prednisolone", "5mg", "Respiratory"),
    ("Ibuprofen", "Ibuprofen", "200mg", "Analgesic"),
];

/// Categories whose generated entries require a prescription.
pub const PRESCRIPTION_CATEGORIES: &[&str] = &["Antibiotic", "Cardiovascular", "Diabetes"];

pub const MANUFACTURERS: &[&str] = &[
    "Sanofi",
    "Pfizer",
    "GSK",
    "Novartis",
    "Cipla",
    "Denk Pharma",
    "Bayer",
    "Local Generics",
];

/// City centre and neighbourhoods used to place generated pharmacies.
pub struct City {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub neighborhoods: &'static [&'static str],
}

pub const CITIES: &[City] = &[
    City {
        name: "Douala",
        lat: 4.0511,
        lng: 9.7679,
        neighborhoods: &["Akwa", "Bonanjo", "Bonapriso", "Deido", "Ndokoti", "Makepe", "Logpom", "City Chic", "Bali"],
    },
    City {
        name: "Yaoundé",
        lat: 3.8480,
        lng: 11.5021,
        neighborhoods: &["Bastos", "Mvan", "Mokolo", "Biyem-Assi", "Mendong", "Ngoa-Ekelle", "Tsinga", "Essos"],
    },
    City {
        name: "Bamenda",
        lat: 5.9631,
        lng: 10.1591,
        neighborhoods: &["Commercial Ave", "Nkwen", "Bambili", "Up Station"],
    },
    City {
        name: "Bafoussam",
        lat: 5.4778,
        lng: 10.4176,
        neighborhoods: &["Centre", "Hausa", "Tamdja"],
    },
    City {
        name: "Buea",
        lat: 4.1550,
        lng: 9.2310,
        neighborhoods: &["Molyko", "Clerks Quarters", "Buea Town"],
    },
];

pub const PHARMACY_PREFIXES: &[&str] = &[
    "Pharmacie",
    "Pharmacie de",
    "Pharmacy",
    "Health Point",
    "MediCare",
    "LifeCare",
    "Green Cross",
];

pub const PHARMACY_SUFFIXES: &[&str] = &[
    "Health", "Plus", "Express", "Center", "Life", "Trust", "Soins", "Espoir", "Alliance", "Lumière", "Paix",
];

/// Orders shown on the partner dashboard.
pub fn mock_orders() -> Vec<Order> {
    let order = |id: &str, customer: &str, items: &[&str], total: u32, status: OrderStatus, time: &str| Order {
        id: id.into(),
        customer_name: customer.into(),
        items: items.iter().map(|i| i.to_string()).collect(),
        total,
        status,
        time: time.into(),
    };
    vec![
        order(
            "ORD-2401",
            "Jean-Paul N.",
            &["Coartem 80/480mg", "Paracetamol 500mg"],
            3000,
            OrderStatus::Ready,
            "10:30 AM",
        ),
        order("ORD-2402", "Marie T.", &["Ventolin Inhaler"], 4000, OrderStatus::Pending, "10:45 AM"),
        order(
            "ORD-2403",
            "Samuel E.",
            &["Ibuprofen 400mg", "Amoxicillin 500mg"],
            2500,
            OrderStatus::Completed,
            "09:15 AM",
        ),
    ]
}

/// User reports shown on the admin dashboard.
pub fn mock_reports() -> Vec<Report> {
    let report = |id: &str,
                  kind: ReportKind,
                  pharmacy: &str,
                  description: &str,
                  (y, m, d): (i32, u32, u32),
                  status: ReportStatus| Report {
        id: id.into(),
        kind,
        pharmacy_name: pharmacy.into(),
        description: description.into(),
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        status,
    };
    vec![
        report(
            "RPT-001",
            ReportKind::PriceMismatch,
            "Pharmacie Akwa",
            "Price for Coartem is 500 XAF higher than listed.",
            (2023, 10, 25),
            ReportStatus::Open,
        ),
        report(
            "RPT-002",
            ReportKind::FakeDrug,
            "Health Point Bonanjo",
            "User reported suspicious packaging for Amoxil.",
            (2023, 10, 24),
            ReportStatus::Open,
        ),
        report(
            "RPT-003",
            ReportKind::PoorService,
            "MediCare Molyko",
            "Pharmacy was closed during stated open hours.",
            (2023, 10, 23),
            ReportStatus::Resolved,
        ),
    ]
}
