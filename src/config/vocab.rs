//! Default vocabularies and constants for the feature pipeline.
//!
//! These reproduce the production term lists: the coded bone-event
//! procedure ids, the free-text fracture/radiation patterns used by the
//! cross-reference detection path, the high-frequency lab panel, and the
//! three drug-class vocabularies. All of them are defaults on
//! [`PipelineConfig`](super::PipelineConfig) and can be overridden from a
//! JSON config file without touching code.

/// Procedure concept ids that directly code a bone event
pub const BONE_EVENT_CONCEPT_IDS: &[i64] = &[
    2_110_698, 2_110_700, 2_110_701, 2_110_699, 2_110_696, 2_110_697,
    2_768_451, 2_103_473, 2_103_475, 2_104_914, 2_105_150,
    46_257_752, 46_257_753, 46_257_748, 2_769_730, 2_765_699,
];

/// Free-text procedure patterns identifying a fracture-type event
pub const FRACTURE_PATTERNS: &[&str] =
    &["pathologic fracture", "bone fracture", "vertebral fracture"];

/// Free-text procedure patterns identifying radiation therapy
pub const RADIATION_PATTERNS: &[&str] = &["radiation", "radiotherapy"];

/// High-frequency lab and vital-sign concepts eligible for windowed features
pub const HIGH_FREQ_LABS: &[&str] = &[
    "Systolic blood pressure",
    "Diastolic blood pressure",
    "Heart rate",
    "Body temperature",
    "Respiratory rate",
    "Oxygen saturation measurement",
    "Body weight",
    "Peripheral oxygen saturation",
    "Body height",
    "Platelets [#/volume] in Blood by Automated count",
    "Creatinine [Mass/volume] in Serum or Plasma",
    "Potassium [Moles/volume] in Serum or Plasma",
    "Sodium [Moles/volume] in Serum or Plasma",
    "Calcium [Mass/volume] in Serum or Plasma",
    "Hematocrit [Volume Fraction] of Blood by Automated count",
    "Hemoglobin [Mass/volume] in Blood",
    "Urea nitrogen [Mass/volume] in Serum or Plasma",
    "Chloride [Moles/volume] in Serum or Plasma",
    "Carbon dioxide, total [Moles/volume] in Serum or Plasma",
    "Anion gap in Serum or Plasma",
    "Leukocytes [#/volume] in Blood by Automated count",
    "Erythrocytes [#/volume] in Blood by Automated count",
    "MCV [Entitic volume] by Automated count",
    "MCH [Entitic mass] by Automated count",
    "MCHC [Mass/volume] by Automated count",
    "Erythrocyte distribution width [Ratio] by Automated count",
    "Neutrophils [#/volume] in Blood by Automated count",
    "Immature granulocytes [#/volume] in Blood by Automated count",
    "Protein [Mass/volume] in Serum or Plasma",
    "Albumin [Mass/volume] in Serum or Plasma",
    "Aspartate aminotransferase [Enzymatic activity/volume] in Serum or Plasma",
    "Alanine aminotransferase [Enzymatic activity/volume] in Serum or Plasma",
    "Bilirubin.total [Mass/volume] in Serum or Plasma",
    "Alkaline phosphatase [Enzymatic activity/volume] in Serum or Plasma",
    "Monocytes [#/volume] in Blood by Automated count",
    "Lymphocytes [#/volume] in Blood by Automated count",
    "Eosinophils [#/volume] in Blood by Automated count",
    "Basophils [#/volume] in Blood by Automated count",
    "Monocytes/100 leukocytes in Blood by Automated count",
    "Lymphocytes/100 leukocytes in Blood by Automated count",
    "Eosinophils/100 leukocytes in Blood by Automated count",
    "Neutrophils/100 leukocytes in Blood by Automated count",
    "Basophils/100 leukocytes in Blood by Automated count",
    "Other cells/100 leukocytes in Blood by Automated count",
    "Immature granulocytes/100 leukocytes in Blood by Automated count",
    "Magnesium [Mass/volume] in Serum or Plasma",
    "Phosphate [Mass/volume] in Serum or Plasma",
    "Nucleated erythrocytes [#/volume] in Blood by Automated count",
    "Nucleated erythrocytes/100 leukocytes [Ratio] in Blood by Automated count",
    "Glomerular filtration rate/1.73 sq M.predicted among non-blacks [Volume Rate/Area] in Serum, Plasma or Blood by Creatinine-based formula (MDRD)",
    "Glomerular filtration rate/1.73 sq M.predicted among blacks [Volume Rate/Area] in Serum, Plasma or Blood by Creatinine-based formula (MDRD)",
    "Bilirubin.direct [Mass/volume] in Serum or Plasma",
    "Glucose [Mass/volume] in Capillary blood by Glucometer",
    "Lactate dehydrogenase [Enzymatic activity/volume] in Serum or Plasma by Lactate to pyruvate reaction",
];

/// Bone-modifying agents (bisphosphonates, RANKL inhibitors, calcitonin)
pub const BMAS: &[&str] = &[
    "zoledronic acid",
    "100 ML zoledronic acid 0.04 MG/ML Injection",
    "100 ML zoledronic acid 0.05 MG/ML Injection",
    "pamidronate",
    "denosumab",
    "1.7 ML denosumab 70 MG/ML Injection",
    "denosumab 60 MG/ML Injectable Solution",
    "alendronate",
    "alendronic acid 70 MG Oral Tablet",
    "alendronic acid 35 MG Oral Tablet",
    "alendronic acid 10 MG Oral Tablet",
    "alendronic acid 0.933 MG/ML Oral Solution",
    "ibandronic acid 150 MG Oral Tablet",
    "ibandronic acid 1 MG/ML Prefilled Syringe",
    "risedronate sodium 150 MG Oral Tablet",
    "risedronate sodium 35 MG Delayed Release Oral Tablet",
    "risedronate sodium 35 MG Oral Tablet",
    "risedronate sodium 5 MG Oral Tablet",
    "calcitonin",
];

/// Cytotoxic chemotherapy agents
pub const CHEMOTHERAPY: &[&str] = &[
    "0.4 ML methotrexate 50 MG/ML Auto-Injector",
    "2 ML eribulin mesylate 0.5 MG/ML Injection",
    "20 ML cytarabine 100 MG/ML Injection",
    "Cytarabine liposome / Daunorubicin Liposomal",
    "arsenic trioxide",
    "azacitidine",
    "bendamustine",
    "bleomycin",
    "busulfan",
    "busulfan 2 MG Oral Tablet",
    "capecitabine 150 MG Oral Tablet",
    "capecitabine 500 MG Oral Tablet",
    "carboplatin",
    "cisplatin",
    "cyclophosphamide",
    "dacarbazine",
    "daunorubicin",
    "decitabine",
    "docetaxel",
    "doxorubicin hydrochloride",
    "doxorubicin liposome",
    "eribulin mesylate",
    "etoposide",
    "fluorouracil",
    "gemcitabine",
    "hydroxyurea",
    "hydroxyurea 500 MG Oral Capsule",
    "idarubicin",
    "ifosfamide",
    "irinotecan",
    "melphalan",
    "methotrexate",
    "mitomycin",
    "mitoxantrone",
    "oxaliplatin",
    "paclitaxel",
    "paclitaxel protein-bound",
    "pemetrexed",
    "temozolomide",
    "thiotepa",
    "trabectedin",
    "vinblastine",
    "vincristine",
    "vinorelbine",
    "pralatrexate",
    "pegaspargase",
    "asparaginase Erwinia chrysanthemi",
    "peginterferon alfa-2a",
];

/// Targeted, endocrine and immune therapy agents
pub const TARGETED_THERAPY: &[&str] = &[
    "0.2 ML lanreotide 300 MG/ML Prefilled Syringe",
    "0.25 ML leuprolide acetate 30 MG/ML Prefilled Syringe",
    "0.375 ML leuprolide acetate 120 MG/ML Prefilled Syringe",
    "0.375 ML leuprolide acetate 60 MG/ML Prefilled Syringe",
    "0.5 ML lanreotide 240 MG/ML Prefilled Syringe",
    "0.5 ML leuprolide acetate 60 MG/ML Prefilled Syringe",
    "1 ML hyaluronidase, human recombinant 150 UNT/ML Injection",
    "1 ML octreotide 0.05 MG/ML Injection",
    "1 ML octreotide 0.1 MG/ML Injection",
    "1 ML octreotide 0.5 MG/ML Injection",
    "abiraterone acetate",
    "alemtuzumab",
    "anastrozole",
    "atezolizumab",
    "avelumab",
    "bevacizumab",
    "bicalutamide",
    "blinatumomab",
    "bortezomib",
    "cabozantinib",
    "carfilzomib",
    "cemiplimab",
    "cetuximab",
    "copanlisib",
    "daratumumab",
    "daratumumab / hyaluronidase",
    "degarelix",
    "durvalumab",
    "elotuzumab",
    "enzalutamide",
    "everolimus",
    "fulvestrant",
    "goserelin",
    "ibrutinib",
    "imatinib",
    "ipilimumab",
    "ixazomib",
    "lanreotide",
    "lenvatinib",
    "leuprolide acetate",
    "luspatercept",
    "midostaurin",
    "nivolumab",
    "obinutuzumab",
    "octreotide",
    "ofatumumab",
    "olaparib",
    "palbociclib",
    "pembrolizumab",
    "pertuzumab",
    "polatuzumab vedotin",
    "ramucirumab",
    "rituximab",
    "rituximab / hyaluronidase",
    "ruxolitinib",
    "sacituzumab govitecan",
    "sipuleucel-T",
    "temsirolimus",
    "trastuzumab",
    "trastuzumab / hyaluronidase",
    "venetoclax",
    "letrozole",
    "letrozole 2.5 MG Oral Tablet",
    "exemestane",
    "alpelisib",
    "nintedanib",
    "sorafenib",
    "belinostat",
    "belantamab mafodotin",
    "sunitinib",
];
