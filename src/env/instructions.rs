//! Manual installation instructions, per operating system.

/// Operating systems with tailored instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    MacOs,
    Linux,
    Windows,
    Other,
}

impl HostOs {
    pub fn current() -> Self {
        Self::from_name(std::env::consts::OS)
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "macos" => HostOs::MacOs,
            "linux" => HostOs::Linux,
            "windows" => HostOs::Windows,
            _ => HostOs::Other,
        }
    }
}

pub fn python_instructions(os: HostOs) -> Vec<&'static str> {
    let mut lines = vec!["🐍 Python Installation:"];
    lines.extend(match os {
        HostOs::MacOs => vec![
            "   # macOS",
            "   brew install python3",
            "   # or download from https://www.python.org/downloads/",
        ],
        HostOs::Linux => vec![
            "   # Ubuntu/Debian",
            "   sudo apt update && sudo apt install python3 python3-pip python3-venv",
            "   # CentOS/RHEL",
            "   sudo yum install python3 python3-pip",
        ],
        HostOs::Windows => vec![
            "   # Windows",
            "   # Download from https://www.python.org/downloads/",
            "   # or use winget: winget install Python.Python.3",
        ],
        HostOs::Other => vec!["   # Download from https://www.python.org/downloads/"],
    });
    lines
}

pub fn venv_instructions(os: HostOs) -> Vec<&'static str> {
    vec![
        "📦 Virtual Environment Setup:",
        "   # Create virtual environment",
        "   python3 -m venv .venv",
        "   # Activate virtual environment",
        match os {
            HostOs::Windows => "   .venv\\Scripts\\activate",
            _ => "   source .venv/bin/activate",
        },
    ]
}

pub fn gitingest_instructions(os: HostOs) -> Vec<&'static str> {
    vec![
        "🔍 gitingest Installation:",
        "   # In virtual environment",
        match os {
            HostOs::Windows => "   .venv\\Scripts\\pip install gitingest",
            _ => "   .venv/bin/pip install gitingest",
        },
        "   # or manually",
        "   pip3 install gitingest",
    ]
}

pub fn node_instructions(os: HostOs) -> Vec<&'static str> {
    let mut lines = vec!["🟢 Node.js Installation:"];
    lines.extend(match os {
        HostOs::MacOs => vec![
            "   # macOS",
            "   brew install node",
            "   # or download from https://nodejs.org/",
        ],
        HostOs::Linux => vec![
            "   # Ubuntu/Debian",
            "   curl -fsSL https://deb.nodesource.com/setup_lts.x | sudo -E bash -",
            "   sudo apt-get install -y nodejs",
            "   # or",
            "   sudo snap install node --classic",
        ],
        HostOs::Windows => vec![
            "   # Windows",
            "   # Download from https://nodejs.org/",
            "   # or use winget: winget install OpenJS.NodeJS",
        ],
        HostOs::Other => vec!["   # Download from https://nodejs.org/"],
    });
    lines
}

/// Every block, in the order `setup` prints them.
pub fn manual_instructions(os: HostOs) -> Vec<Vec<&'static str>> {
    vec![
        python_instructions(os),
        venv_instructions(os),
        gitingest_instructions(os),
        node_instructions(os),
    ]
}
