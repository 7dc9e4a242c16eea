//! Built-in sample articles.
//!
//! The default source: fifteen fixed articles returned in the same order for
//! every topic.  Handy for trying the UI without network access and as a
//! deterministic fixture in tests.

use anyhow::Result;

use super::{Article, DataSource};

/// `(title, source, description, body)` for each sample article.
const SAMPLES: [(&str, &str, &str, &str); 15] = [
    (
        "OpenAI Announces GPT-5: A New Era in AI",
        "Tech Daily",
        "Breaking news in AI development...",
        "OpenAI has announced the release of GPT-5, a new AI model that promises to revolutionize the way we interact with technology. The company claims that GPT-5 is capable of understanding and generating human language with unprecedented accuracy.",
    ),
    (
        "Python 4.0 Release Date Confirmed",
        "Programming Weekly",
        "The next major Python version...",
        "Python 4.0 has been officially confirmed to be released in June 2025. This new version promises to bring significant improvements to the language, including better performance and more efficient memory management.",
    ),
    (
        "New Quantum Computing Breakthrough",
        "Science Today",
        "Scientists achieve quantum supremacy...",
        "A team of researchers has successfully demonstrated quantum supremacy, marking a significant milestone in quantum computing. This breakthrough could revolutionize fields from cryptography to drug discovery.",
    ),
    (
        "SpaceX Successfully Launches Starship",
        "Space News",
        "Historic launch marks new era...",
        "SpaceX has successfully launched its Starship spacecraft, marking a historic moment in space exploration. The launch represents a major step toward making human life multi-planetary.",
    ),
    (
        "Major Updates Coming to Git",
        "Dev Chronicles",
        "New features for developers...",
        "Git is set to receive major updates that will enhance developer productivity. New features include improved merge conflict resolution and better handling of large repositories.",
    ),
    (
        "AI-Powered Code Generation Tools Rise",
        "Tech Insider",
        "The future of programming...",
        "AI-powered code generation tools are becoming increasingly sophisticated, raising questions about the future of software development. These tools can now handle complex programming tasks.",
    ),
    (
        "New JavaScript Framework Released",
        "Web Dev News",
        "Another framework joins the ecosystem...",
        "A new JavaScript framework has been released, promising better performance and developer experience. The framework focuses on simplicity and ease of use.",
    ),
    (
        "Cybersecurity Threats on the Rise",
        "Security Weekly",
        "Experts warn of new vulnerabilities...",
        "Cybersecurity experts are warning of an increase in sophisticated attacks. Organizations are advised to strengthen their security measures.",
    ),
    (
        "Machine Learning Models Get Smaller",
        "AI Weekly",
        "Efficient AI development...",
        "Researchers have developed new techniques to create smaller, more efficient machine learning models. These models can run on edge devices while maintaining high accuracy.",
    ),
    (
        "Cloud Computing Costs Drop",
        "Cloud Tech News",
        "Good news for businesses...",
        "Major cloud providers have announced significant price reductions for their services. This move is expected to make cloud computing more accessible to smaller businesses.",
    ),
    (
        "New Database Technology Emerges",
        "Database Weekly",
        "Revolutionary data storage...",
        "A new database technology promises to combine the benefits of SQL and NoSQL databases. Early benchmarks show impressive performance improvements.",
    ),
    (
        "Linux Kernel Gets Major Update",
        "Open Source Daily",
        "Significant improvements...",
        "The Linux kernel has received a major update that improves system performance and adds support for new hardware. The update also includes important security patches.",
    ),
    (
        "AR Development Made Easier",
        "AR/VR Today",
        "New tools for AR developers...",
        "New development tools have been released that simplify the creation of augmented reality applications. These tools make AR development more accessible to regular developers.",
    ),
    (
        "5G Networks Expand Coverage",
        "Tech Networks",
        "Faster connectivity coming...",
        "5G network coverage is expanding rapidly across major cities. The improved connectivity is enabling new applications and services.",
    ),
    (
        "Blockchain in Supply Chain",
        "Chain News",
        "Technology meets logistics...",
        "Major retailers are adopting blockchain technology to improve supply chain transparency. The technology helps track products from source to consumer.",
    ),
];

/// The fixed sample collection.  Ignores the topic.
#[derive(Debug, Default, Clone, Copy)]
pub struct DummySource;

impl DummySource {
    pub fn articles() -> Vec<Article> {
        SAMPLES
            .iter()
            .map(|&(title, source, description, body)| Article::new(title, source, description, body))
            .collect()
    }
}

impl DataSource for DummySource {
    fn name(&self) -> &str {
        "Sample articles"
    }

    fn fetch(&self, _topic: Option<&str>) -> Result<Vec<Article>> {
        Ok(Self::articles())
    }
}
