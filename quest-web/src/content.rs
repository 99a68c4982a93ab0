//! Tutorial text shown for each module
use quest_game::ModuleId;

pub struct ModuleContent {
    pub title: &'static str,
    pub icon: &'static str,
    pub summary: &'static str,
    pub steps: &'static [&'static str],
}

#[must_use]
pub fn module_content(module: ModuleId) -> &'static ModuleContent {
    match module {
        ModuleId::Data => &DATA,
        ModuleId::Visual => &VISUAL,
        ModuleId::Format => &FORMAT,
        ModuleId::Interactive => &INTERACTIVE,
        ModuleId::Publish => &PUBLISH,
    }
}

static DATA: ModuleContent = ModuleContent {
    title: "Data Connection",
    icon: "📊",
    summary: "Bring the HR dataset into Power BI and shape it for analysis.",
    steps: &[
        "Connect to the HR dataset",
        "Review columns in Power Query",
        "Clean and transform fields",
        "Load the model and check relationships",
    ],
};

static VISUAL: ModuleContent = ModuleContent {
    title: "Visualizations",
    icon: "📈",
    summary: "Turn the model into charts that answer workforce questions.",
    steps: &[
        "Add KPI cards for headcount",
        "Build an attrition bar chart",
        "Create a department donut chart",
        "Plot hiring trends on a line chart",
        "Add a salary distribution table",
    ],
};

static FORMAT: ModuleContent = ModuleContent {
    title: "Design & Formatting",
    icon: "🎨",
    summary: "Give the report a consistent, readable layout.",
    steps: &[
        "Apply a consistent theme",
        "Align and size visuals on a grid",
        "Add titles and data labels",
        "Set conditional formatting",
    ],
};

static INTERACTIVE: ModuleContent = ModuleContent {
    title: "Interactivity",
    icon: "🖱️",
    summary: "Let viewers filter and explore the data themselves.",
    steps: &[
        "Add slicers for department and year",
        "Configure cross-filtering between visuals",
        "Create a drill-through page",
    ],
};

static PUBLISH: ModuleContent = ModuleContent {
    title: "Publishing",
    icon: "🚀",
    summary: "Ship the dashboard to the people who need it.",
    steps: &[
        "Publish the report to the Power BI service",
        "Pin visuals to a dashboard",
        "Share the dashboard with stakeholders",
    ],
};
